mod actions;
mod common;
mod risk;
