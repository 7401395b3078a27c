// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{self, controller};
use crate::controllers::RetryPolicy;
use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of SecretBindings reconciled concurrently
    pub concurrent_syncs: u16,
    /// Delay policy applied after a failed reconciliation
    pub retry_policy: RetryPolicy,
    /// Interval at which every cached SecretBinding is reconciled again, disabled when unset
    pub resync_period: Option<Duration>,
    /// Name reported as the source of Events
    pub controller_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            concurrent_syncs: controller::CONCURRENT_SYNCS,
            retry_policy: RetryPolicy::default(),
            resync_period: None,
            controller_name: constants::CONTROLLER_NAME.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let concurrent_syncs =
            parse_var(&lookup, "CONCURRENT_SYNCS")?.unwrap_or(controller::CONCURRENT_SYNCS);
        if concurrent_syncs == 0 {
            bail!("CONCURRENT_SYNCS must be at least 1");
        }

        let retry_delay = Duration::from_secs(
            parse_var(&lookup, "RETRY_DELAY_SECS")?.unwrap_or(controller::RETRY_DELAY_SECS),
        );
        let retry_policy = match parse_var::<u64, _>(&lookup, "RETRY_MAX_DELAY_SECS")? {
            Some(max) => RetryPolicy::Exponential {
                base: retry_delay,
                max: Duration::from_secs(max).max(retry_delay),
            },
            None => RetryPolicy::Fixed(retry_delay),
        };

        let resync_period = parse_var::<u64, _>(&lookup, "RESYNC_PERIOD_SECS")?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let controller_name = lookup("CONTROLLER_NAME")
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| constants::CONTROLLER_NAME.to_string());

        Ok(Config {
            concurrent_syncs,
            retry_policy,
            resync_period,
            controller_name,
        })
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{} has an invalid value: {:?}", name, raw))
        })
        .transpose()
}
