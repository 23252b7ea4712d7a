//! HTML shaping for the presentation boundary: the station listing table and
//! the explanatory error fragments.
//!
//! This is the only place where validation errors become markup; everywhere
//! else they stay structured values.

use crate::directory::DirectoryEntry;
use crate::query::ValidationError;

const CODE_STYLE: &str = "background-color:#E0E0E0; padding:2px";
const STATIONS_ROUTE: &str = "/api/v1.0/stations";

/// Wraps a snippet in the inline `<code>` styling the service uses in all
/// of its explanatory messages.
fn code(snippet: &str) -> String {
    format!("<code style=\"{CODE_STYLE}\">{snippet}</code>")
}

/// Minimal escaping for user-supplied values interpolated into markup.
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders the station directory as an HTML table, one row per entry, with
/// the same column order as the JSON shape.
pub fn stations_table(entries: &[DirectoryEntry]) -> String {
    let mut out = String::new();
    out.push_str("<table>\n<thead>\n<tr>");
    for header in [
        "station",
        "name",
        "latitude",
        "longitude",
        "elevation",
        "start_date",
        "end_date",
        "prec_percent_missing",
        "temp_percent_missing",
    ] {
        out.push_str(&format!("<th>{header}</th>"));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for entry in entries {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&entry.station),
            escape(&entry.name),
            entry.latitude,
            entry.longitude,
            entry.elevation,
            entry.start_date,
            entry.end_date,
            entry.prec_percent_missing,
            entry.temp_percent_missing,
        ));
    }
    out.push_str("</tbody>\n</table>");
    out
}

/// Renders a validation failure as the explanatory HTML fragment the
/// frontend serves in place of a result.
pub fn error_fragment(error: &ValidationError) -> String {
    match error {
        ValidationError::MissingOrInvalidQtype { value } => {
            let lead = match value {
                Some(v) => format!("<p>Error: Invalid {} '{}'. ", code("qtype"), escape(v)),
                None => format!(
                    "<p>Error: You must specify the {} for this query. ",
                    code("qtype")
                ),
            };
            format!(
                "{lead}Valid qtypes include {} and {}.</p>\n\
                 <p>See the API documentation for the precipitation and temperature routes.</p>",
                code("stats"),
                code("data"),
            )
        }
        ValidationError::MissingOrInvalidStation { value } => match value {
            Some(v) => format!(
                "<p>Error: Invalid {} '{}'.</p>\n<p>See {} for valid stations.</p>",
                code("station"),
                escape(v),
                code(STATIONS_ROUTE),
            ),
            None => format!(
                "<p>Error: You must specify the {} for this query.</p>\n\
                 <p>See {} for valid stations.</p>",
                code("station"),
                code(STATIONS_ROUTE),
            ),
        },
        ValidationError::InvalidDateFormat { param, value } => format!(
            "<p>Error: Invalid {} format: '{}'.</p>\n\
             <p>See the API documentation for the precipitation and temperature routes.</p>",
            code(param.as_str()),
            escape(value),
        ),
        ValidationError::FromDateOutOfRange {
            value,
            min_date,
            station,
        } => format!(
            "<p>Error: Invalid {} '{}'.</p>\
             <p>{} must occur on or after the first available date {} for station {}.</p>\n\
             <p>See {} for valid date ranges for each station.</p>",
            code("from_date"),
            escape(value),
            code("from_date"),
            min_date,
            escape(station),
            code(STATIONS_ROUTE),
        ),
        ValidationError::ToDateOutOfRange {
            value,
            max_date,
            station,
        } => format!(
            "<p>Error: Invalid {} '{}'.</p>\
             <p>{} must occur on or before the last available date {} for station {}.</p>\n\
             <p>See {} for valid date ranges for each station.</p>",
            code("to_date"),
            escape(value),
            code("to_date"),
            max_date,
            escape(station),
            code(STATIONS_ROUTE),
        ),
        ValidationError::ToDateNotAfterFromDate { from_date, to_date } => format!(
            "<p>Error: {} must occur after {}. ({} = '{}' and {} = '{}')</p>",
            code("to_date"),
            code("from_date"),
            code("from_date"),
            from_date,
            code("to_date"),
            to_date,
        ),
        ValidationError::MissingOrInvalidMode { value } => {
            let lead = match value {
                Some(v) => format!("<p>Error: Invalid {} '{}'. ", code("mode"), escape(v)),
                None => format!(
                    "<p>Error: You must specify the {} for this query. ",
                    code("mode")
                ),
            };
            format!(
                "{lead}Valid modes include {} and {}.</p>\n<p>Example: {}</p>",
                code("json"),
                code("html"),
                code(&format!("{STATIONS_ROUTE}?mode=html")),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry() -> DirectoryEntry {
        DirectoryEntry {
            station: "USC00519397".to_string(),
            name: "WAIKIKI 717.2, HI US".to_string(),
            latitude: 21.2716,
            longitude: -157.8168,
            elevation: 3.0,
            start_date: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2017, 8, 23).unwrap(),
            prec_percent_missing: "9.36%".to_string(),
            temp_percent_missing: "2.36%".to_string(),
        }
    }

    #[test]
    fn table_lists_headers_and_rows() {
        let html = stations_table(&[entry()]);
        assert!(html.starts_with("<table>"));
        assert!(html.contains("<th>station</th>"));
        assert!(html.contains("<th>temp_percent_missing</th>"));
        assert!(html.contains("<td>USC00519397</td>"));
        assert!(html.contains("<td>2010-01-01</td>"));
        assert!(html.contains("<td>9.36%</td>"));
    }

    #[test]
    fn error_fragment_echoes_value_in_code_style() {
        let html = error_fragment(&ValidationError::MissingOrInvalidStation {
            value: Some("USC00000000".to_string()),
        });
        assert!(html.contains("'USC00000000'"));
        assert!(html.contains("<code"));
        assert!(html.contains("/api/v1.0/stations"));
    }

    #[test]
    fn missing_mode_fragment_lists_valid_modes() {
        let html = error_fragment(&ValidationError::MissingOrInvalidMode { value: None });
        assert!(html.contains("You must specify the"));
        assert!(html.contains(">json</code>"));
        assert!(html.contains(">html</code>"));
        assert!(html.contains("?mode=html"));
    }

    #[test]
    fn interpolated_values_are_escaped() {
        let html = error_fragment(&ValidationError::MissingOrInvalidQtype {
            value: Some("<script>".to_string()),
        });
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
