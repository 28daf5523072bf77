//! Extraction of municipality links and vote counts from volby.cz result pages.
//!
//! `scraper::Html` is not `Send`, so every function here parses the page body
//! and returns owned data; documents never live across an `.await`.

use crate::domain::model::{MunicipalityLink, MunicipalityPage, PartyVotes};
use crate::utils::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};
use url::Url;

const REGISTERED_VOTERS_HEADER: &str = "sa2";
const ENVELOPES_ISSUED_HEADER: &str = "sa3";
const VALID_VOTES_HEADER: &str = "sa6";
const PARTY_VOTES_HEADER_SUFFIX: &str = "sa2";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::ConfigError {
        message: format!("Invalid selector '{}': {}", css, e),
    })
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// 解析整數欄位；volby.cz 以不換行空格作為千位分隔符
pub fn parse_count(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// 從區域索引頁取得所有市鎮 (代碼、名稱、詳細頁 URL)，保持文件順序
pub fn parse_municipality_links(body: &str, base_url: &Url) -> Result<Vec<MunicipalityLink>> {
    let document = Html::parse_document(body);
    let row_selector = selector("tr")?;
    let code_selector = selector("td.cislo")?;
    let name_selector = selector("td.overflow_name")?;
    let anchor_selector = selector("a[href]")?;

    let mut links = Vec::new();
    for row in document.select(&row_selector) {
        let (Some(code_td), Some(name_td)) = (
            row.select(&code_selector).next(),
            row.select(&name_selector).next(),
        ) else {
            continue;
        };

        let Some(anchor) = code_td.select(&anchor_selector).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let url = base_url.join(href)?;
        links.push(MunicipalityLink {
            code: cell_text(&anchor),
            name: cell_text(&name_td),
            url,
        });
    }

    tracing::debug!("Parsed {} municipality links from {}", links.len(), base_url);
    Ok(links)
}

fn summary_count(document: &Html, header: &str, url: &str) -> Result<u64> {
    let css = format!(r#"td[headers="{}"]"#, header);
    let cell = document
        .select(&selector(&css)?)
        .next()
        .ok_or_else(|| ScrapeError::parse(url, format!("missing summary cell {}", header)))?;

    let text = cell_text(&cell);
    parse_count(&text).ok_or_else(|| {
        ScrapeError::parse(url, format!("cell {} is not a number: '{}'", header, text))
    })
}

/// 政黨得票欄位：headers 中有一個以 sa2 結尾的 td.cislo
fn party_vote_cell<'a>(row: &ElementRef<'a>, cell_selector: &Selector) -> Option<ElementRef<'a>> {
    row.select(cell_selector).find(|td| {
        td.value()
            .attr("headers")
            .map(|headers| {
                headers
                    .split_whitespace()
                    .any(|h| h.ends_with(PARTY_VOTES_HEADER_SUFFIX))
            })
            .unwrap_or(false)
    })
}

/// 解析市鎮詳細頁：選民數、發出信封數、有效票數及各政黨得票
pub fn parse_municipality_page(body: &str, url: &str) -> Result<MunicipalityPage> {
    let document = Html::parse_document(body);

    let registered_voters = summary_count(&document, REGISTERED_VOTERS_HEADER, url)?;
    let envelopes_issued = summary_count(&document, ENVELOPES_ISSUED_HEADER, url)?;
    let valid_votes = summary_count(&document, VALID_VOTES_HEADER, url)?;

    let row_selector = selector("tr")?;
    let name_selector = selector("td.overflow_name")?;
    let cell_selector = selector("td.cislo")?;

    let mut party_votes = Vec::new();
    for row in document.select(&row_selector) {
        let Some(name_td) = row.select(&name_selector).next() else {
            continue;
        };
        let party = cell_text(&name_td);

        let votes = match party_vote_cell(&row, &cell_selector) {
            Some(td) => {
                let text = cell_text(&td);
                Some(parse_count(&text).ok_or_else(|| {
                    ScrapeError::parse(
                        url,
                        format!("votes for '{}' are not a number: '{}'", party, text),
                    )
                })?)
            }
            None => {
                tracing::debug!("No vote cell for '{}' on {}", party, url);
                None
            }
        };

        party_votes.push(PartyVotes { party, votes });
    }

    Ok(MunicipalityPage {
        registered_voters,
        envelopes_issued,
        valid_votes,
        party_votes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = include_str!("../../tests/fixtures/index.html");
    const BENESOV: &str = include_str!("../../tests/fixtures/benesov.html");
    const INDEX_URL: &str =
        "https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101";

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("13\u{a0}104"), Some(13104));
        assert_eq!(parse_count(" 148 "), Some(148));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("-"), None);
        assert_eq!(parse_count("64,75"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn test_parse_municipality_links() {
        let base = Url::parse(INDEX_URL).unwrap();
        let links = parse_municipality_links(INDEX, &base).unwrap();

        let summary: Vec<(&str, &str)> = links
            .iter()
            .map(|l| (l.code.as_str(), l.name.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("529303", "Benešov"),
                ("532568", "Bernartice"),
                ("530743", "Bílkovice"),
            ]
        );

        assert_eq!(
            links[0].url.as_str(),
            "https://www.volby.cz/pls/ps2017nss/ps311?xjazyk=CZ&xkraj=2&xobec=529303&xvyber=2101"
        );
    }

    #[test]
    fn test_parse_links_without_table() {
        let base = Url::parse(INDEX_URL).unwrap();
        let links = parse_municipality_links("<html><body><p>Nic</p></body></html>", &base).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_parse_municipality_page() {
        let page = parse_municipality_page(BENESOV, "benesov").unwrap();

        assert_eq!(page.registered_voters, 13104);
        assert_eq!(page.envelopes_issued, 8485);
        assert_eq!(page.valid_votes, 8437);

        let parties: Vec<(&str, Option<u64>)> = page
            .party_votes
            .iter()
            .map(|p| (p.party.as_str(), p.votes))
            .collect();
        assert_eq!(
            parties,
            vec![
                ("Občanská demokratická strana", Some(1052)),
                ("Řád národa - Vlastenecká unie", Some(5)),
                ("ANO 2011", Some(2577)),
                ("Realisté", None),
            ]
        );
    }

    #[test]
    fn test_missing_summary_cell_is_parse_error() {
        let body = r#"<table><tr><td class="cislo" headers="sa2">10</td></tr></table>"#;
        let err = parse_municipality_page(body, "http://localhost/ps311").unwrap_err();

        assert!(matches!(err, ScrapeError::ParseError { .. }));
        assert!(err.to_string().contains("sa3"));
    }

    #[test]
    fn test_non_numeric_votes_rejected() {
        let body = r#"<table>
            <tr><td headers="sa2">10</td><td headers="sa3">8</td><td headers="sa6">8</td></tr>
            <tr><td class="overflow_name">ANO 2011</td><td class="cislo" headers="t1sa2 t1sb3">n/a</td></tr>
        </table>"#;
        let err = parse_municipality_page(body, "http://localhost/ps311").unwrap_err();

        assert!(err.to_string().contains("ANO 2011"));
    }
}
