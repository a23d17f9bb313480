//! Reference-site scrape client: situational splits, the id redirect, and
//! team schedules.
//!
//! The site serves plain HTML with most stat tables wrapped in HTML
//! comments to defeat naive scrapers, so parsing starts by stripping the
//! comment markers and then walks `<table>` blocks with small regexes.
//! Numeric-looking columns are typed as floats, everything else stays text.

use super::{ProviderError, SplitsSource};
use crate::domain::{Season, StatDomain};
use polars::prelude::*;
use regex::Regex;
use std::time::Duration;

const BASE_URL: &str = "https://www.baseball-reference.com";

/// Blocking client for the reference site.
pub struct BrefClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl BrefClient {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn get_html(&self, url: &str) -> Result<Option<String>, ProviderError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(Some(resp.text()?))
    }
}

impl Default for BrefClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitsSource for BrefClient {
    fn splits(
        &self,
        bbref_id: &str,
        season: Season,
        domain: StatDomain,
    ) -> Result<Option<DataFrame>, ProviderError> {
        let side = match domain {
            StatDomain::Batting => "b",
            StatDomain::Pitching => "p",
        };
        let url = format!(
            "{}/players/split.fcgi?id={bbref_id}&year={season}&t={side}",
            self.base_url
        );
        let Some(html) = self.get_html(&url)? else {
            return Ok(None);
        };

        let uncommented = strip_comment_markers(&html);
        let mut combined: Option<DataFrame> = None;
        for (_, table_html) in extract_tables(&uncommented) {
            let Some(df) = table_to_frame(&table_html)? else {
                continue;
            };
            if df.column("Split").is_err() {
                continue;
            }
            match &mut combined {
                None => combined = Some(df),
                Some(acc) => {
                    // Split categories share one schema on well-formed
                    // pages; anything else is a layout table.
                    if acc.get_column_names() == df.get_column_names() {
                        acc.vstack_mut(&df)?;
                    }
                }
            }
        }
        Ok(combined)
    }

    fn reverse_lookup(&self, player_id: u32) -> Result<Option<String>, ProviderError> {
        let url = format!(
            "{}/redirect.fcgi?player=1&mlb_ID={player_id}",
            self.base_url
        );
        let resp = self.client.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url,
            });
        }
        // The redirect lands on the player page; its path carries the id.
        let final_path = resp.url().path().to_string();
        let re = Regex::new(r"/players/[a-z]/([a-z0-9'\.]+)\.shtml").expect("static pattern");
        Ok(re
            .captures(&final_path)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string()))
    }

    fn schedule_and_record(
        &self,
        team_abbreviation: &str,
        season: Season,
    ) -> Result<DataFrame, ProviderError> {
        let url = format!(
            "{}/teams/{team_abbreviation}/{season}-schedule-scores.shtml",
            self.base_url
        );
        let Some(html) = self.get_html(&url)? else {
            return Err(ProviderError::NotFound {
                entity: "schedule",
                key: format!("{team_abbreviation} {season}"),
            });
        };

        let uncommented = strip_comment_markers(&html);
        for (id, table_html) in extract_tables(&uncommented) {
            if id.as_deref() != Some("team_schedule") {
                continue;
            }
            if let Some(df) = table_to_frame(&table_html)? {
                return Ok(df);
            }
        }
        Err(ProviderError::ResponseFormat(format!(
            "no schedule table on {url}"
        )))
    }
}

// ── html table parsing ──────────────────────────────────────────────────────

/// Remove comment markers so the hidden tables become visible to the
/// table walker. Comment bodies themselves are kept.
fn strip_comment_markers(html: &str) -> String {
    html.replace("<!--", "").replace("-->", "")
}

/// Every `<table>` block in document order, paired with its id attribute.
fn extract_tables(html: &str) -> Vec<(Option<String>, String)> {
    let table_re = Regex::new(r"(?s)<table[^>]*>(.*?)</table>").expect("static pattern");
    let id_re = Regex::new(r#"id\s*=\s*"([^"]+)""#).expect("static pattern");
    table_re
        .captures_iter(html)
        .map(|caps| {
            let open_tag = caps.get(0).map(|m| m.as_str()).unwrap_or("");
            let open_tag = &open_tag[..open_tag.find('>').map(|i| i + 1).unwrap_or(0)];
            let id = id_re
                .captures(open_tag)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string());
            (id, caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default())
        })
        .collect()
}

/// Parse one table body into a DataFrame. Returns `None` for tables with
/// no usable header or no data rows.
fn table_to_frame(table_html: &str) -> Result<Option<DataFrame>, ProviderError> {
    let row_re = Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>").expect("static pattern");
    let cell_re = Regex::new(r"(?s)<t[hd][^>]*>(.*?)</t[hd]>").expect("static pattern");
    let tag_re = Regex::new(r"<[^>]+>").expect("static pattern");

    let rows: Vec<Vec<String>> = row_re
        .captures_iter(table_html)
        .map(|row| {
            cell_re
                .captures_iter(row.get(1).map(|m| m.as_str()).unwrap_or(""))
                .map(|cell| clean_cell(cell.get(1).map(|m| m.as_str()).unwrap_or(""), &tag_re))
                .collect()
        })
        .collect();

    // Header is the last all-<th> style row before data; in practice the
    // deepest header row is the last row whose cells are column names, and
    // the page always puts it first in <thead>. The first non-empty row
    // with more than one cell serves.
    let Some(header_idx) = rows.iter().position(|r| r.len() > 1) else {
        return Ok(None);
    };
    let header = dedup_names(&rows[header_idx]);

    let data: Vec<&Vec<String>> = rows[header_idx + 1..]
        .iter()
        .filter(|r| r.len() == header.len())
        // Repeated in-body header rows echo the first column name.
        .filter(|r| r[0] != header[0])
        .collect();
    if data.is_empty() {
        return Ok(None);
    }

    let mut columns = Vec::with_capacity(header.len());
    for (i, name) in header.iter().enumerate() {
        let cells: Vec<&str> = data.iter().map(|r| r[i].as_str()).collect();
        columns.push(column_from_cells(name, &cells));
    }
    Ok(Some(DataFrame::new(columns)?))
}

/// Type a column as Float64 when every non-empty cell parses, otherwise
/// keep the text.
fn column_from_cells(name: &str, cells: &[&str]) -> Column {
    let parsed: Vec<Option<f64>> = cells
        .iter()
        .map(|c| if c.is_empty() { None } else { c.parse::<f64>().ok() })
        .collect();
    let all_numeric = cells
        .iter()
        .zip(&parsed)
        .all(|(c, p)| c.is_empty() || p.is_some());
    let any_value = parsed.iter().any(|p| p.is_some());

    if all_numeric && any_value {
        Column::new(name.into(), parsed)
    } else {
        let values: Vec<Option<&str>> = cells
            .iter()
            .map(|c| if c.is_empty() { None } else { Some(*c) })
            .collect();
        Column::new(name.into(), values)
    }
}

fn clean_cell(raw: &str, tag_re: &Regex) -> String {
    let text = tag_re.replace_all(raw, "");
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#39;", "'")
        .trim()
        .to_string()
}

fn dedup_names(names: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashMap::new();
    names
        .iter()
        .map(|n| {
            let base = if n.is_empty() { "col" } else { n.as_str() };
            let count = seen.entry(base.to_string()).or_insert(0u32);
            *count += 1;
            if *count == 1 {
                base.to_string()
            } else {
                format!("{base}_{count}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPLITS_PAGE: &str = r#"
        <html><body>
        <div><!--
        <table class="stats_table" id="platoon">
          <thead><tr><th>Split</th><th>G</th><th>PA</th><th>BA</th></tr></thead>
          <tbody>
            <tr><th scope="row">vs RHP</th><td>88</td><td>301</td><td>.291</td></tr>
            <tr><th scope="row">vs LHP</th><td>44</td><td>120</td><td>.265</td></tr>
          </tbody>
        </table>
        --></div>
        <div><!--
        <table class="stats_table" id="hmvis">
          <thead><tr><th>Split</th><th>G</th><th>PA</th><th>BA</th></tr></thead>
          <tbody>
            <tr><th scope="row">Home</th><td>66</td><td>210</td><td>.301</td></tr>
            <tr><th scope="row">Away</th><td>66</td><td>211</td><td>.270</td></tr>
          </tbody>
        </table>
        --></div>
        </body></html>
    "#;

    #[test]
    fn hidden_tables_become_visible() {
        let visible = strip_comment_markers(SPLITS_PAGE);
        assert_eq!(extract_tables(&visible).len(), 2);
    }

    #[test]
    fn table_ids_are_captured() {
        let visible = strip_comment_markers(SPLITS_PAGE);
        let ids: Vec<_> = extract_tables(&visible)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(
            ids,
            vec![Some("platoon".to_string()), Some("hmvis".to_string())]
        );
    }

    #[test]
    fn split_table_parses_with_typed_columns() {
        let visible = strip_comment_markers(SPLITS_PAGE);
        let (_, table_html) = extract_tables(&visible).remove(0);
        let df = table_to_frame(&table_html).unwrap().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(
            df.column("Split").unwrap().str().unwrap().get(0),
            Some("vs RHP")
        );
        assert_eq!(df.column("PA").unwrap().f64().unwrap().get(1), Some(120.0));
        assert_eq!(df.column("BA").unwrap().f64().unwrap().get(0), Some(0.291));
    }

    #[test]
    fn layout_rows_and_repeated_headers_are_dropped() {
        let html = r#"
        <table>
          <thead><tr><th>Split</th><th>G</th></tr></thead>
          <tbody>
            <tr><th scope="row">Home</th><td>66</td></tr>
            <tr class="thead"><th>Split</th><th>G</th></tr>
            <tr><th scope="row">Away</th><td>65</td></tr>
            <tr><td colspan="2">footer note</td></tr>
          </tbody>
        </table>"#;
        let (_, table_html) = extract_tables(html).remove(0);
        let df = table_to_frame(&table_html).unwrap().unwrap();
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn cell_text_is_stripped_and_decoded() {
        let tag_re = Regex::new(r"<[^>]+>").unwrap();
        assert_eq!(
            clean_cell(r#"<a href="/x">vs&nbsp;RHP</a>"#, &tag_re),
            "vs RHP"
        );
        assert_eq!(clean_cell("M&amp;M", &tag_re), "M&M");
    }

    #[test]
    fn duplicate_header_names_get_suffixes() {
        let names = vec!["R".to_string(), "R".to_string(), String::new()];
        assert_eq!(dedup_names(&names), vec!["R", "R_2", "col"]);
    }
}
