//! File name extraction from `Content-Disposition` headers.

use std::sync::LazyLock;

use regex::Regex;

/// Name used when the service does not suggest one.
pub const DEFAULT_REPORT_NAME: &str = "report.xlsx";

static EXTENDED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)filename\*=UTF-8''([^;]+)").expect("extended filename pattern")
});
static PLAIN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)filename="?([^";]+)"?"#).expect("plain filename pattern"));

/// Suggested download name for a report response.
///
/// `filename*=UTF-8''...` wins over `filename=...`. Both forms are
/// percent-decoded; a name that does not decode to UTF-8 is kept as sent.
pub fn report_file_name(header: Option<&str>) -> String {
    let Some(header) = header else {
        return DEFAULT_REPORT_NAME.to_string();
    };
    let raw = EXTENDED_NAME
        .captures(header)
        .or_else(|| PLAIN_NAME.captures(header))
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().trim());
    match raw {
        Some(raw) if !raw.is_empty() => match urlencoding::decode(raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw.to_string(),
        },
        _ => DEFAULT_REPORT_NAME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_name() {
        assert_eq!(
            report_file_name(Some("attachment; filename=\"summary.xlsx\"")),
            "summary.xlsx"
        );
    }

    #[test]
    fn missing_header_uses_default() {
        assert_eq!(report_file_name(None), "report.xlsx");
    }

    #[test]
    fn header_without_name_uses_default() {
        assert_eq!(report_file_name(Some("attachment")), "report.xlsx");
    }

    #[test]
    fn unquoted_name() {
        assert_eq!(
            report_file_name(Some("attachment; filename=summary_20240101.xlsx")),
            "summary_20240101.xlsx"
        );
    }

    #[test]
    fn extended_name_takes_precedence() {
        let header =
            "attachment; filename=\"fallback.xlsx\"; filename*=UTF-8''r%C3%A9sum%C3%A9.xlsx";
        assert_eq!(report_file_name(Some(header)), "résumé.xlsx");
    }

    #[test]
    fn case_insensitive_parameter_names() {
        assert_eq!(
            report_file_name(Some("attachment; FILENAME=\"Upper.xlsx\"")),
            "Upper.xlsx"
        );
    }

    #[test]
    fn plain_names_are_percent_decoded() {
        assert_eq!(
            report_file_name(Some("attachment; filename=\"zone%20rollup.xlsx\"")),
            "zone rollup.xlsx"
        );
    }

    #[test]
    fn undecodable_name_is_kept_verbatim() {
        assert_eq!(
            report_file_name(Some("attachment; filename*=UTF-8''bad%FF.xlsx")),
            "bad%FF.xlsx"
        );
    }
}
