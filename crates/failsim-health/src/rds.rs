//! AWS RDS control plane.
//!
//! `describe_instance` maps onto `DescribeDBInstances` and
//! `force_failover` onto `RebootDBInstance` with `ForceFailover=true`.
//! Credentials come from the SDK's default provider chain.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_rds::error::DisplayErrorContext;
use tracing::debug;

use failsim_core::InstanceSnapshot;

use crate::client::{ControlPlaneClient, ControlPlaneError};

/// RDS client configuration.
#[derive(Debug, Clone, Default)]
pub struct RdsConfig {
    /// Region override. `None` uses the SDK's region chain.
    pub region: Option<String>,
    /// Endpoint override (LocalStack, VPC endpoints).
    pub endpoint: Option<String>,
    /// SDK-level operation timeout.
    pub operation_timeout: Option<Duration>,
}

pub struct RdsControlPlane {
    client: aws_sdk_rds::Client,
}

impl RdsControlPlane {
    pub async fn new(config: RdsConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = config.region {
            loader = loader.region(aws_config::Region::new(region));
        }
        if let Some(endpoint) = config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        if let Some(timeout) = config.operation_timeout {
            loader = loader.timeout_config(
                TimeoutConfig::builder().operation_timeout(timeout).build(),
            );
        }

        let sdk_config = loader.load().await;
        Self {
            client: aws_sdk_rds::Client::new(&sdk_config),
        }
    }

    pub fn from_client(client: aws_sdk_rds::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ControlPlaneClient for RdsControlPlane {
    async fn describe_instance(
        &self,
        identifier: &str,
    ) -> Result<InstanceSnapshot, ControlPlaneError> {
        let result = self
            .client
            .describe_db_instances()
            .db_instance_identifier(identifier)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_db_instance_not_found_fault() {
                    ControlPlaneError::NotFound(identifier.to_string())
                } else {
                    ControlPlaneError::Transport(format!(
                        "DescribeDBInstances failed: {}",
                        DisplayErrorContext(&service_error)
                    ))
                }
            })?;

        let instance = result
            .db_instances()
            .first()
            .ok_or_else(|| ControlPlaneError::NotFound(identifier.to_string()))?;

        let snapshot = InstanceSnapshot::new(
            instance.db_instance_status().unwrap_or_default(),
            instance.availability_zone().unwrap_or_default(),
        );
        debug!(%identifier, status = %snapshot.status, "DescribeDBInstances");
        Ok(snapshot)
    }

    async fn force_failover(&self, identifier: &str) -> Result<(), ControlPlaneError> {
        self.client
            .reboot_db_instance()
            .db_instance_identifier(identifier)
            .force_failover(true)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_db_instance_not_found_fault() {
                    ControlPlaneError::NotFound(identifier.to_string())
                } else {
                    ControlPlaneError::Transport(format!(
                        "RebootDBInstance failed: {}",
                        DisplayErrorContext(&service_error)
                    ))
                }
            })?;

        debug!(%identifier, "RebootDBInstance(ForceFailover=true) accepted");
        Ok(())
    }
}
