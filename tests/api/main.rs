// one integration binary: every file here is a module, compiled and linked
// once
//
//   tests/api/main.rs
//   tests/api/helpers.rs
//   tests/api/<one file per route>.rs
mod health_check;
mod helpers;
mod home;
