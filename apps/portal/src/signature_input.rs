use ppe_portal_core::{AppError, AppResult};
use ppe_portal_domain::SignaturePoint;

/// Parses one pen stroke typed as whitespace-separated `x,y` pairs.
pub fn parse_stroke(line: &str) -> AppResult<Vec<SignaturePoint>> {
    line.split_whitespace().map(parse_point).collect()
}

fn parse_point(pair: &str) -> AppResult<SignaturePoint> {
    let invalid = || AppError::Validation(format!("invalid point '{pair}', expected x,y"));
    let (x, y) = pair.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<f32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<f32>().map_err(|_| invalid())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }

    Ok(SignaturePoint::new(x, y))
}
