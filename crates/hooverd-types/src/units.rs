//! Winston/AR unit conversion.

use crate::constants::WINSTON_PER_AR;

/// Format a winston amount as AR, trimming trailing fractional zeros.
///
/// `1_500_000_000_000` winston formats as `"1.5"`, whole amounts have no
/// decimal point.
pub fn winston_to_ar(winston: u128) -> String {
    let whole = winston / WINSTON_PER_AR;
    let frac = winston % WINSTON_PER_AR;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:012}", frac);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
