//! Typed lookups into a `serde_json::Value` params object.
//!
//! Lenient lookups for the numeric tunables: a missing key or a value of the
//! wrong JSON type yields the default. Range checks happen afterwards in
//! [`DemoConfig::validate`](crate::DemoConfig::validate).

use serde_json::Value;

/// `params[name]` as `f64`; integers are accepted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// `params[name]` as `u64`; only non-negative integers are accepted.
pub fn param_u64(params: &Value, name: &str, default: u64) -> u64 {
    params.get(name).and_then(Value::as_u64).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"frequency": 2});
        assert!((param_f64(&params, "frequency", 1.0) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_wrong_type() {
        let params = json!({"frequency": "high"});
        assert!((param_f64(&params, "frequency", 1.5) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn param_u64_extracts_integer() {
        let params = json!({"window_back": 30});
        assert_eq!(param_u64(&params, "window_back", 100), 30);
    }

    #[test]
    fn param_u64_ignores_negative_value() {
        let params = json!({"seed": -3});
        assert_eq!(param_u64(&params, "seed", 42), 42);
    }

    #[test]
    fn param_u64_returns_default_when_missing() {
        assert_eq!(param_u64(&json!({}), "seed", 42), 42);
    }

    #[test]
    fn helpers_return_defaults_for_non_object() {
        let params = json!([1, 2, 3]);
        assert_eq!(param_u64(&params, "seed", 7), 7);
        assert!((param_f64(&params, "frequency", 2.5) - 2.5).abs() < f64::EPSILON);
    }
}
