use crate::error::GwResult;

/// Central finite difference `(f(x + dx) - f(x - dx)) / 2dx`.
pub fn central_difference<F>(mut f: F, x: f64, dx: f64) -> GwResult<f64>
where
    F: FnMut(f64) -> GwResult<f64>,
{
    Ok((f(x + dx)? - f(x - dx)?) / (2.0 * dx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivative_of_sine() {
        let d = central_difference(|x| Ok(x.sin()), 0.3, 1e-6).unwrap();
        assert!((d - 0.3_f64.cos()).abs() < 1e-9);
    }
}
