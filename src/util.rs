/// Checks that a numerical value lies in the provided range, producing an
/// [`Error::OutOfInterval`](crate::error::Error::OutOfInterval) naming the expression if not
///
/// ### Example
/// ```ignore
/// let gamma = 1.5;
/// check_interval!(gamma, 0.0..1.0)?;
/// ```
/// This fails with the message "invalid value for \`gamma\`: 1.5 is not in the interval 0.0..1.0".
#[macro_export]
macro_rules! check_interval {
    ($var:expr, $range:expr) => {{
        let range = $range;
        let value = $var;
        if ::std::ops::RangeBounds::contains(&range, &value) {
            Ok(())
        } else {
            Err($crate::error::Error::OutOfInterval {
                name: stringify!($var),
                value: value as f64,
                interval: format!("{:?}", range),
            })
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::error::{Error, Result};

    fn check(gamma: f64) -> Result<()> {
        check_interval!(gamma, 0.0..1.0)
    }

    #[test]
    fn check_interval_functional() {
        assert!(check(0.0).is_ok());
        assert!(check(0.99).is_ok());
        assert_eq!(
            check(1.0),
            Err(Error::OutOfInterval {
                name: "gamma",
                value: 1.0,
                interval: String::from("0.0..1.0"),
            })
        );
        assert!(check(-0.1).is_err());
    }
}
