pub mod countdown;
pub mod model;
pub mod resolver;
pub mod runner;
