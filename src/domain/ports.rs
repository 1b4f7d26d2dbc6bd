use crate::clean::CleanResult;
use crate::domain::model::OutputRow;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn concurrent_requests(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<OutputRow>>;
    async fn transform(&self, rows: Vec<OutputRow>) -> Result<CleanResult>;
    async fn load(&self, result: CleanResult) -> Result<String>;
}
