//! Node Subcommand.

use crate::flags::{GlobalArgs, MockSequencerArgs, NodeMode, RpcArgs, SyncArgs};
use alloy_primitives::Address;
use alloy_provider::RootProvider;
use anyhow::{Result, anyhow, bail};
use backon::{ExponentialBuilder, Retryable};
use clap::Parser;
use morph_cli::LogConfig;
use morph_engine::{EngineClient, ExecutionEngine, FileJwtSecret, JwtSecretProvider};
use morph_executor::{
    DEFAULT_MAX_L1_MESSAGES_PER_BLOCK, Executor, ExecutorConfig, MockSequencer, SequencerExecutor,
    ValidatorExecutor,
};
use morph_rpc::{L2NodeApiServer, L2NodeRpc, launch};
use morph_storage::MessageDb;
use morph_sync::{SyncError, Syncer};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use url::Url;

/// The name of the data directory below the home directory.
const DEFAULT_DATADIR_NAME: &str = ".morph-node";

/// The name of the JWT secret file inside the data directory.
const DEFAULT_JWT_SECRET_FILE: &str = "jwt-secret.txt";

/// The name of the L1 message database inside the data directory.
const L1_MESSAGE_DB_DIR: &str = "l1-messages";

/// Command-line interface for running a Morph node.
///
/// # Node Modes
///
/// - **Validator**: checks and delivers blocks agreed by consensus.
/// - **Sequencer**: additionally follows L1 deposits and proposes blocks including them.
///
/// # Configuration Sources
///
/// Configuration can be provided through command-line arguments or environment variables
/// prefixed with `MORPH_NODE_`.
///
/// # Examples
///
/// ```bash
/// # Run as validator with default settings
/// morph-node node --l2-engine-rpc http://localhost:8551 --l2-eth-rpc http://localhost:8545
///
/// # Run as a standalone sequencer
/// morph-node node --mode sequencer \
///                 --l1-eth-rpc http://localhost:8545 \
///                 --deposit-contract 0x... \
///                 --mock-sequencer
/// ```
#[derive(Parser, PartialEq, Eq, Debug, Clone)]
#[command(about = "Runs the node")]
pub struct NodeCommand {
    /// The mode to run the node in.
    #[arg(long = "mode", default_value_t = NodeMode::Validator, env = "MORPH_NODE_MODE")]
    pub node_mode: NodeMode,
    /// URL of the L1 execution client RPC API. Required in sequencer mode.
    #[arg(long, visible_alias = "l1", env = "MORPH_NODE_L1_ETH_RPC")]
    pub l1_eth_rpc: Option<Url>,
    /// URL of the public RPC API of the L2 execution client.
    #[arg(long, default_value = "http://localhost:8545", env = "MORPH_NODE_L2_ETH_RPC")]
    pub l2_eth_rpc: Url,
    /// URL of the engine API endpoint of the L2 execution client.
    #[arg(
        long,
        visible_alias = "l2",
        default_value = "http://localhost:8551",
        env = "MORPH_NODE_L2_ENGINE_RPC"
    )]
    pub l2_engine_rpc: Url,
    /// Path to the hex encoded JWT secret of the engine API. Generated if absent.
    ///
    /// Defaults to `jwt-secret.txt` inside the data directory.
    #[arg(long, visible_alias = "l2.jwt-secret", env = "MORPH_NODE_L2_ENGINE_AUTH")]
    pub l2_engine_jwt_secret: Option<PathBuf>,
    /// The data directory. Defaults to `~/.morph-node`.
    #[arg(long, env = "MORPH_NODE_DATADIR")]
    pub datadir: Option<PathBuf>,
    /// Address of the L1 contract emitting deposit events. Required in sequencer mode.
    #[arg(long, env = "MORPH_NODE_DEPOSIT_CONTRACT")]
    pub deposit_contract: Option<Address>,
    /// The maximum number of L1 messages included in one block.
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_L1_MESSAGES_PER_BLOCK,
        env = "MORPH_NODE_MAX_L1_MESSAGES_PER_BLOCK"
    )]
    pub max_l1_messages_per_block: u64,
    /// Queue index of the last L1 message already included on L2.
    #[arg(long, default_value = "0", env = "MORPH_NODE_LATEST_PROCESSED_L1_INDEX")]
    pub latest_processed_l1_index: u64,
    /// L1 sync CLI arguments.
    #[command(flatten)]
    pub sync_flags: SyncArgs,
    /// RPC CLI arguments.
    #[command(flatten)]
    pub rpc_flags: RpcArgs,
    /// Mock sequencer CLI arguments.
    #[command(flatten)]
    pub mock_flags: MockSequencerArgs,
}

impl NodeCommand {
    /// Initializes the logging system based on global arguments.
    pub fn init_logs(&self, args: &GlobalArgs) -> Result<()> {
        // The HTTP stack logs every connection at debug.
        let filter = EnvFilter::from_default_env()
            .add_directive("hyper_util=info".parse()?)
            .add_directive("jsonrpsee_server=info".parse()?);
        LogConfig::new(args.log_args.clone()).init_tracing_subscriber(Some(filter))?;
        Ok(())
    }

    /// Checks the flags against the rules of the selected mode.
    pub fn validate(&self) -> Result<()> {
        if self.node_mode == NodeMode::Sequencer {
            if self.l1_eth_rpc.is_none() {
                bail!("--l1-eth-rpc is required in sequencer mode");
            }
            if self.deposit_contract.is_none() {
                bail!("--deposit-contract is required in sequencer mode");
            }
        }
        if self.mock_flags.enabled && self.node_mode != NodeMode::Sequencer {
            bail!("--mock-sequencer requires sequencer mode");
        }
        Ok(())
    }

    /// Returns the data directory.
    pub fn datadir(&self) -> Result<PathBuf> {
        match &self.datadir {
            Some(path) => Ok(path.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(DEFAULT_DATADIR_NAME))
                .ok_or_else(|| anyhow!("Failed to resolve the home directory, set --datadir")),
        }
    }

    /// Returns the path of the JWT secret file.
    pub fn jwt_secret_path(&self, datadir: &Path) -> PathBuf {
        self.l2_engine_jwt_secret.clone().unwrap_or_else(|| datadir.join(DEFAULT_JWT_SECRET_FILE))
    }

    /// Returns the executor configuration.
    pub fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig::default()
            .with_max_l1_messages_per_block(self.max_l1_messages_per_block)
            .with_latest_processed_l1_index(self.latest_processed_l1_index)
    }

    /// Waits until the execution engine answers and returns its height.
    async fn wait_for_engine(engine: &EngineClient) -> Result<u64> {
        let height = (|| engine.block_number())
            .retry(ExponentialBuilder::default())
            .notify(|err, duration| {
                debug!(
                    target: "morph::node",
                    %err,
                    "Retrying execution engine connection after {duration:?}"
                );
            })
            .await?;
        Ok(height)
    }

    /// Opens the L1 message store and spawns the syncer filling it.
    fn start_syncer(
        &self,
        datadir: &Path,
        metrics_enabled: bool,
        cancellation: CancellationToken,
    ) -> Result<(Arc<MessageDb>, JoinHandle<Result<(), SyncError>>)> {
        let (Some(l1_eth_rpc), Some(deposit_contract)) =
            (self.l1_eth_rpc.clone(), self.deposit_contract)
        else {
            bail!("The L1 syncer requires --l1-eth-rpc and --deposit-contract");
        };

        let mut store = MessageDb::new(&datadir.join(L1_MESSAGE_DB_DIR))?;
        if metrics_enabled {
            store = store.with_metrics();
        }
        let store = Arc::new(store);

        let syncer = Syncer::new(
            RootProvider::new_http(l1_eth_rpc),
            store.clone(),
            self.sync_flags.config(deposit_contract),
        )?;
        Ok((store, tokio::spawn(syncer.run(cancellation))))
    }

    /// Run the Node subcommand.
    pub async fn run(self, args: &GlobalArgs) -> Result<()> {
        self.validate()?;

        let datadir = self.datadir()?;
        std::fs::create_dir_all(&datadir).map_err(|err| {
            anyhow!("Failed to create data directory {}: {err}", datadir.display())
        })?;

        let jwt_secret = FileJwtSecret::new(self.jwt_secret_path(&datadir)).secret()?;
        let engine =
            EngineClient::new_http(self.l2_engine_rpc.clone(), self.l2_eth_rpc.clone(), jwt_secret);
        let height = Self::wait_for_engine(&engine).await?;

        info!(
            target: "morph::node",
            mode = %self.node_mode,
            datadir = %datadir.display(),
            height,
            "Starting morph node"
        );

        // Spawned tasks stop once this future completes or is dropped.
        let cancellation = CancellationToken::new();
        let _cancel_on_exit = cancellation.clone().drop_guard();

        let mut syncer = None;
        let executor: Executor<EngineClient, MessageDb> = match self.node_mode {
            NodeMode::Sequencer => {
                let (store, handle) =
                    self.start_syncer(&datadir, args.metrics.enabled, cancellation.clone())?;
                syncer = Some(handle);
                SequencerExecutor::new(engine, store, self.executor_config())?.into()
            }
            NodeMode::Validator => ValidatorExecutor::new(engine, self.executor_config())?.into(),
        };
        let node = Arc::new(executor);

        let server =
            launch(&self.rpc_flags.clone().into(), L2NodeRpc::new(node.clone()).into_rpc()).await?;

        if self.mock_flags.enabled {
            let driver = MockSequencer::new(node.clone(), self.mock_flags.block_time());
            tokio::spawn(driver.run(cancellation.clone()));
        }

        let syncer_exit = async {
            match syncer {
                Some(handle) => handle.await,
                None => std::future::pending().await,
            }
        };
        let server_exit = async {
            match server {
                Some(handle) => handle.stopped().await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            result = syncer_exit => match result {
                Ok(Ok(())) => info!(target: "morph::node", "L1 syncer stopped"),
                Ok(Err(err)) => bail!("L1 syncer failed: {err}"),
                Err(err) => bail!("L1 syncer task failed: {err}"),
            },
            _ = server_exit => bail!("RPC server stopped unexpectedly"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SEQUENCER_FLAGS: &[&str] = &[
        "node",
        "--mode",
        "sequencer",
        "--l1-eth-rpc",
        "http://localhost:8545",
        "--deposit-contract",
        "0x00000000000000000000000000000000000000dd",
    ];

    #[test]
    fn test_node_cli_defaults() {
        let args = NodeCommand::parse_from(["node"]);
        assert_eq!(args.node_mode, NodeMode::Validator);
        assert_eq!(args.l2_engine_rpc.as_str(), "http://localhost:8551/");
        assert_eq!(args.executor_config(), ExecutorConfig::default());
        assert!(!args.mock_flags.enabled);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_sequencer_flags() {
        let args = NodeCommand::parse_from(SEQUENCER_FLAGS.iter().chain(&["--mock-sequencer"]));
        assert_eq!(args.node_mode, NodeMode::Sequencer);
        assert_eq!(args.deposit_contract, Some(Address::with_last_byte(0xdd)));
        assert!(args.validate().is_ok());
    }

    #[rstest]
    #[case::sequencer_without_l1(&["node", "--mode", "sequencer", "--deposit-contract", "0x00000000000000000000000000000000000000dd"])]
    #[case::sequencer_without_contract(&["node", "--mode", "sequencer", "--l1-eth-rpc", "http://localhost:8545"])]
    #[case::mock_on_validator(&["node", "--mock-sequencer"])]
    fn test_invalid_mode_combinations(#[case] flags: &[&str]) {
        assert!(NodeCommand::parse_from(flags).validate().is_err());
    }

    #[test]
    fn test_invalid_mode() {
        assert!(NodeCommand::try_parse_from(["node", "--mode", "proposer"]).is_err());
    }

    #[test]
    fn test_jwt_secret_defaults_to_datadir() {
        let dir = tempfile::TempDir::new().unwrap();
        let args = NodeCommand::parse_from(["node", "--datadir", dir.path().to_str().unwrap()]);

        let datadir = args.datadir().unwrap();
        assert_eq!(datadir, dir.path());
        assert_eq!(args.jwt_secret_path(&datadir), dir.path().join(DEFAULT_JWT_SECRET_FILE));

        let args = NodeCommand::parse_from(["node", "--l2-engine-jwt-secret", "/etc/jwt.hex"]);
        assert_eq!(args.jwt_secret_path(&datadir), PathBuf::from("/etc/jwt.hex"));
    }

    #[test]
    fn test_executor_config_flags() {
        let args = NodeCommand::parse_from([
            "node",
            "--max-l1-messages-per-block",
            "7",
            "--latest-processed-l1-index",
            "42",
        ]);
        let config = args.executor_config();
        assert_eq!(config.max_l1_messages_per_block, 7);
        assert_eq!(config.latest_processed_l1_index, 42);
    }

    #[tokio::test]
    async fn test_sequencer_opens_store_and_spawns_syncer() {
        let dir = tempfile::TempDir::new().unwrap();
        let args = NodeCommand::parse_from(SEQUENCER_FLAGS);

        let cancellation = CancellationToken::new();
        let (_store, handle) = args.start_syncer(dir.path(), false, cancellation.clone()).unwrap();
        assert!(dir.path().join(L1_MESSAGE_DB_DIR).exists());

        cancellation.cancel();
        handle.await.unwrap().unwrap();
    }
}
