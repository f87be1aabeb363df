mod u256;

pub use u256::{mul_div_floor, U256};
