use crate::domain::model::{MunicipalityResult, ResultTable};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn district_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn url_prefix(&self) -> &str;
    fn timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
    fn delimiter(&self) -> u8;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<MunicipalityResult>>;
    async fn transform(&self, data: Vec<MunicipalityResult>) -> Result<ResultTable>;
    async fn load(&self, table: ResultTable) -> Result<String>;
}
