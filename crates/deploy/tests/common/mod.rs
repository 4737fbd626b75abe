//! Shared fakes for the integration tests: a chain that confirms immediately and
//! shell scripts standing in for solc and the binding generator.

#![allow(dead_code)]

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use alloy_core::{
    json_abi::JsonAbi,
    primitives::{Address, B256, Bytes},
};
use tokup_deploy::{
    ArtifactLayout, ChainConnector, ContractDeployer, DeployedContract, DeploymentError,
    DeploymentParameters, Settings, TokenBinding, ToolCommand, parse_endpoint, parse_signer,
};

/// First default anvil account.
pub const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const ANVIL_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const RPC_ENDPOINT: &str = "http://127.0.0.1:8545";

pub const TOKEN_ABI: &str = r#"[{"type":"constructor","inputs":[{"name":"name","type":"string","internalType":"string"},{"name":"symbol","type":"string","internalType":"string"}],"stateMutability":"nonpayable"}]"#;
pub const TOKEN_BIN: &str = "608060405234801561001057600080fd5b50";

pub const FAKE_SOLC: &str = r#"
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift ;;
  esac
  shift
done
mkdir -p "$out"
printf '%s' __TOKEN_ABI__ > "$out/Token.abi"
printf '%s' __TOKEN_BIN__ > "$out/Token.bin"
"#;

pub const FAKE_GENERATOR: &str = r#"
out=""; ns=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift ;;
    -p) ns="$2"; shift ;;
  esac
  shift
done
dir="$out/$(echo "$ns" | tr . /)"
mkdir -p "$dir"
echo "public class Token {}" > "$dir/Token.java"
"#;

pub const FAILING_TOOL: &str = "echo 'Error: something went wrong' >&2\nexit 1\n";

pub fn params() -> DeploymentParameters {
    DeploymentParameters::new(ANVIL_KEY, "Tok", "TKN", RPC_ENDPOINT)
}

pub fn token_binding() -> TokenBinding {
    let abi: JsonAbi = serde_json::from_str(TOKEN_ABI).unwrap();
    let code = Bytes::from(hex::decode(TOKEN_BIN).unwrap());
    TokenBinding::new(abi, code, "src/com/token/Token.java", Path::new("Token.abi")).unwrap()
}

/// Write `script` into `dir` and return a command running it with `sh`.
pub fn script_tool(dir: &Path, name: &str, script: &str) -> ToolCommand {
    let path = dir.join(name);
    let script = script
        .replace("__TOKEN_ABI__", &format!("'{}'", TOKEN_ABI))
        .replace("__TOKEN_BIN__", TOKEN_BIN);
    std::fs::write(&path, script).unwrap();
    ToolCommand::new("sh").args([path.display().to_string()])
}

/// Settings rooted in `dir` with a contract source in place and scripted tools.
pub fn scripted_settings(dir: &Path, solc: &str, generator: &str) -> Settings {
    let layout = ArtifactLayout::default().rooted_at(dir);
    std::fs::create_dir_all(layout.source.parent().unwrap()).unwrap();
    std::fs::write(&layout.source, "contract Token { constructor(string memory, string memory) {} }")
        .unwrap();

    let mut settings = Settings::default();
    settings.layout = layout;
    settings.toolchain.solc = script_tool(dir, "solc.sh", solc);
    settings.toolchain.binding_generator = script_tool(dir, "web3j.sh", generator);
    settings
}

/// Observable state of the mock chain.
#[derive(Debug, Default)]
pub struct ChainState {
    pub connections: AtomicUsize,
    pub submissions: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub nonce: AtomicU64,
    pub init_codes: Mutex<Vec<Bytes>>,
    fail_on: HashSet<usize>,
    hang: bool,
    latency: Option<Duration>,
}

/// A chain that mines every creation transaction immediately.
#[derive(Debug, Clone, Default)]
pub struct MockChain {
    pub state: Arc<ChainState>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revert the given submissions (1-based, counted across the chain's lifetime).
    pub fn failing_on(submissions: impl IntoIterator<Item = usize>) -> Self {
        Self::with_state(ChainState {
            fail_on: submissions.into_iter().collect(),
            ..Default::default()
        })
    }

    /// Accept transactions but never mine them.
    pub fn stalled() -> Self {
        Self::with_state(ChainState {
            hang: true,
            ..Default::default()
        })
    }

    /// Take `latency` to mine each transaction.
    pub fn slow(latency: Duration) -> Self {
        Self::with_state(ChainState {
            latency: Some(latency),
            ..Default::default()
        })
    }

    fn with_state(state: ChainState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub fn connections(&self) -> usize {
        self.state.connections.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> usize {
        self.state.submissions.load(Ordering::SeqCst)
    }
}

impl ChainConnector for MockChain {
    type Deployer = MockDeployer;

    fn connect(&self, rpc_endpoint: &str, signing_key: &str) -> Result<MockDeployer, DeploymentError> {
        self.state.connections.fetch_add(1, Ordering::SeqCst);
        parse_endpoint(rpc_endpoint)?;
        let signer = parse_signer(signing_key)?;
        Ok(MockDeployer {
            state: self.state.clone(),
            address: signer.address(),
        })
    }
}

pub struct MockDeployer {
    state: Arc<ChainState>,
    address: Address,
}

impl ContractDeployer for MockDeployer {
    fn deployer_address(&self) -> Address {
        self.address
    }

    async fn deploy_contract(&self, init_code: Bytes) -> Result<DeployedContract, DeploymentError> {
        let submission = self.state.submissions.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.init_codes.lock().unwrap().push(init_code);

        let in_flight = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        if self.state.hang {
            std::future::pending::<()>().await;
        }
        if let Some(latency) = self.state.latency {
            tokio::time::sleep(latency).await;
        }

        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);

        let tx_hash = B256::with_last_byte(submission as u8);
        if self.state.fail_on.contains(&submission) {
            return Err(DeploymentError::Reverted {
                tx_hash: tx_hash.to_string(),
            });
        }

        let nonce = self.state.nonce.fetch_add(1, Ordering::SeqCst);
        Ok(DeployedContract {
            address: self.address.create(nonce),
            tx_hash,
        })
    }
}

pub fn temp_dir(prefix: &str) -> (tempdir::TempDir, PathBuf) {
    let dir = tempdir::TempDir::new(prefix).unwrap();
    let path = dir.path().to_path_buf();
    (dir, path)
}
