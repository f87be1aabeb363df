use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer.
    pub struct U256(4);
}

/// computes `floor(a * b / c)` using a 256-bit intermediate product
///
/// returns None if `c` is zero or if the result does not fit into a u128
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> Option<u128> {
    if c == 0 {
        return None;
    }
    let value = U256::from(a) * U256::from(b) / U256::from(c);
    if value > U256::from(u128::MAX) {
        None
    } else {
        Some(value.as_u128())
    }
}
