mod bus_tests;
mod facade_tests;
mod rail_tests;
mod tube_tests;
