//! Test fixtures: representative company dataset exports.
//!
//! The header mirrors the real export, so both lookup paths line up:
//!   0 Organisation Id, 3 country, 5 Category, 6 number of employees,
//!   7 median Salary, 8 profits in 2020(million), 9 profits in 2021(million)
//!
//! Row notes for `fixture_companies_csv`:
//!   - D4 has an unparseable 2021 profit ("n/a")
//!   - E5 has zero employees
//!   - the second A1 row is the only row for country Z
//!   - A1 (10 + 25) and F6 (35) tie on total employees in "retail"

/// Eight data rows across countries X, Y, Z and categories Retail/Software.
#[cfg(test)]
pub(crate) fn fixture_companies_csv() -> &'static str {
    "Organisation Id,Name,Website,country,Founded,Category,number of employees,median Salary,profits in 2020(million),profits in 2021(million)
A1,Acme,acme.example,X,1999,Retail,10,100.0,10.0,11.0
B2,Bolt,bolt.example,X,2005,retail,20,200.0,12.0,13.0
C3,Cirrus,cirrus.example,Y,2010,Software,30,150.5,20.0,25.0
D4,Delta,delta.example,Y,2012,Software,40,180.25,18.0,n/a
E5,Echo,echo.example,Y,2001,Software,0,90.0,5.0,4.0
A1,Acme,acme.example,Z,1999,Retail,25,120.0,4.0,5.0
F6,Foxtrot,fox.example,Y,2015,Retail,35,75.0,6.0,9.0
G7,Golf,golf.example,Y,2003,Software,45,210.0,10.0,8.0
"
}

/// Same header with a non-numeric employee count. The distance engine must
/// abort on this input; the tolerant engines skip the row.
#[cfg(test)]
pub(crate) fn fixture_bad_employee_count_csv() -> &'static str {
    "Organisation Id,Name,Website,country,Founded,Category,number of employees,median Salary,profits in 2020(million),profits in 2021(million)
A1,Acme,acme.example,X,1999,Retail,10,100.0,10.0,11.0
B2,Bolt,bolt.example,X,2005,Retail,lots,200.0,12.0,13.0
C3,Cirrus,cirrus.example,X,2010,Retail,30,150.0,14.0,12.0
"
}

/// Rows that exercise the ranking engine's skip rules: truncated row,
/// negative head count, zero base profit.
#[cfg(test)]
pub(crate) fn fixture_ranking_edge_cases_csv() -> &'static str {
    "Organisation Id,Name,Website,country,Founded,Category,number of employees,median Salary,profits in 2020(million),profits in 2021(million)
K1,Kilo,kilo.example,X,1990,Energy,12,80.0,4.0,3.0
L2,Lima,lima.example,X,1991,Energy
M3,Mike,mike.example,X,1992,Energy,-4,80.0,4.0,3.0
N4,November,nov.example,X,1993,Energy,8,80.0,0.0,3.0
O5,Oscar,oscar.example,X,1994,ENERGY,30,80.0,2.0,2.5
"
}
