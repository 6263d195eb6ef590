/// Rounded percentage for confidence badges ("87%").
pub(crate) fn percent(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

/// Locale date for an ISO timestamp. Outside the browser (host test builds)
/// falls back to the date part of the raw string.
pub(crate) fn format_date(iso: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_str(iso));
        if date.get_time().is_nan() {
            return iso.to_string();
        }
        String::from(date.to_locale_date_string("en-US", &wasm_bindgen::JsValue::UNDEFINED))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        iso.split('T').next().unwrap_or(iso).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds() {
        assert_eq!(percent(0.87), "87%");
        assert_eq!(percent(0.005), "1%");
        assert_eq!(percent(1.0), "100%");
        assert_eq!(percent(0.0), "0%");
    }

    #[test]
    fn test_format_date_host_fallback() {
        assert_eq!(format_date("2024-05-01T10:00:00Z"), "2024-05-01");
        assert_eq!(format_date("2024-05-01"), "2024-05-01");
    }
}
