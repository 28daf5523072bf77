use crate::adapters::html;
use crate::adapters::http::PageClient;
use crate::core::{ConfigProvider, MunicipalityResult, Pipeline, ResultTable, Storage};
use crate::utils::error::{Result, ScrapeError};
use url::Url;

pub const FIXED_COLUMNS: [&str; 5] = ["code", "location", "registered", "envelopes", "valid"];

pub struct ElectionPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: PageClient,
}

impl<S: Storage, C: ConfigProvider> ElectionPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = PageClient::new(config.timeout(), config.user_agent())?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }
}

/// 政黨欄位：以第一個市鎮的順序為準，之後新出現的政黨附加在後
fn party_columns(data: &[MunicipalityResult]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for (index, result) in data.iter().enumerate() {
        for party in &result.party_votes {
            if !columns.contains(&party.party) {
                if index > 0 {
                    tracing::warn!(
                        "Party '{}' first appears in {} ({}), appending column",
                        party.party,
                        result.name,
                        result.code
                    );
                }
                columns.push(party.party.clone());
            }
        }
    }
    columns
}

fn optional_count(votes: Option<u64>) -> String {
    votes.map(|v| v.to_string()).unwrap_or_default()
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ElectionPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<MunicipalityResult>> {
        let district_url = self.config.district_url();
        let base_url = Url::parse(district_url)?;

        tracing::info!("🔄 Loading district page {}", district_url);
        let index_body = self.client.fetch(district_url).await?;
        let links = html::parse_municipality_links(&index_body, &base_url)?;

        if links.is_empty() {
            return Err(ScrapeError::NoMunicipalitiesError {
                url: district_url.to_string(),
            });
        }
        tracing::info!("📋 Found {} municipalities", links.len());

        // 依序抓取，不並行
        let mut results = Vec::with_capacity(links.len());
        for (i, link) in links.iter().enumerate() {
            tracing::info!(
                "📥 {}/{} Processing: {} ({})",
                i + 1,
                links.len(),
                link.name,
                link.code
            );
            let body = self.client.fetch(link.url.as_str()).await?;
            let page = html::parse_municipality_page(&body, link.url.as_str())?;
            results.push(MunicipalityResult::new(link, page));
        }

        Ok(results)
    }

    async fn transform(&self, data: Vec<MunicipalityResult>) -> Result<ResultTable> {
        let parties = party_columns(&data);

        let mut header: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
        header.extend(parties.iter().cloned());

        let rows = data
            .iter()
            .map(|result| {
                let mut row = vec![
                    result.code.clone(),
                    result.name.clone(),
                    result.registered_voters.to_string(),
                    result.envelopes_issued.to_string(),
                    result.valid_votes.to_string(),
                ];
                row.extend(
                    parties
                        .iter()
                        .map(|party| optional_count(result.votes_for(party))),
                );
                row
            })
            .collect();

        Ok(ResultTable { header, rows })
    }

    async fn load(&self, table: ResultTable) -> Result<String> {
        let output_path = self.config.output_path().to_string();

        let csv_data = {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(self.config.delimiter())
                .from_writer(Vec::new());
            writer.write_record(&table.header)?;
            for row in &table.rows {
                writer.write_record(row)?;
            }
            writer
                .into_inner()
                .map_err(|e| ScrapeError::IoError(e.into_error()))?
        };

        tracing::debug!(
            "Writing CSV ({} rows, {} bytes) to {}",
            table.rows.len(),
            csv_data.len(),
            output_path
        );
        self.storage.write_file(&output_path, &csv_data).await?;

        Ok(output_path)
    }
}
