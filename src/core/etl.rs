use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Outcome of one completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: String,
    pub fetched: usize,
    pub written: usize,
    pub malformed: usize,
    pub inactive: usize,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Fetching roster sheet");
        let rows = self.pipeline.extract().await?;
        let fetched = rows.len();
        tracing::info!("Fetched {} rows", fetched);

        let result = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Kept {} accounts, dropped {} ({} malformed, {} inactive)",
            result.accounts.len(),
            result.dropped(),
            result.malformed,
            result.inactive
        );

        let output_path = self.pipeline.load(&result.accounts).await?;
        tracing::info!("Roster written to: {}", output_path);

        Ok(RunSummary {
            output_path,
            fetched,
            written: result.accounts.len(),
            malformed: result.malformed,
            inactive: result.inactive,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Account, InputRow, TransformResult};
    use crate::utils::error::RosterError;
    use async_trait::async_trait;

    struct StubPipeline {
        fail_extract: bool,
    }

    #[async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<Vec<InputRow>> {
            if self.fail_extract {
                return Err(RosterError::SourceError {
                    status: 500,
                    message: "down".to_string(),
                });
            }
            Ok(vec![InputRow::default(), InputRow::default()])
        }

        async fn transform(&self, rows: Vec<InputRow>) -> Result<TransformResult> {
            Ok(TransformResult {
                accounts: vec![Account {
                    account: "@a@b.c".to_string(),
                    name: "A".to_string(),
                    link: "https://b.c/@a".to_string(),
                }],
                malformed: rows.len() - 1,
                inactive: 0,
            })
        }

        async fn load(&self, _accounts: &[Account]) -> Result<String> {
            Ok("out.csv".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_summary() {
        let engine = EtlEngine::new(StubPipeline { fail_extract: false });
        let summary = engine.run().await.unwrap();
        assert_eq!(
            summary,
            RunSummary {
                output_path: "out.csv".to_string(),
                fetched: 2,
                written: 1,
                malformed: 1,
                inactive: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_extract_failure_aborts_run() {
        let engine = EtlEngine::new(StubPipeline { fail_extract: true });
        assert!(matches!(
            engine.run().await,
            Err(RosterError::SourceError { status: 500, .. })
        ));
    }
}
