// This source is derived from Parity code
//
//! Celo chain parameters.
//!
//! The built-in registry knows mainnet and the public testnets. Further
//! networks can be deserialized from configuration and added with
//! [`Networks::extend`].

use crate::error::Error;

pub const CELO_CHAIN_ID: u64 = 42220;
pub const ALFAJORES_CHAIN_ID: u64 = 44787;
pub const BAKLAVA_CHAIN_ID: u64 = 62320;

/// Name reported for chain ids no registry entry matches.
pub const UNKNOWN_NETWORK: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
	pub name: String,
	pub chain_id: u64,
}

impl Network {
	pub fn new<S: Into<String>>(name: S, chain_id: u64) -> Self {
		Network { name: name.into(), chain_id }
	}
}

/// Registry of networks, looked up by name or chain id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Networks(Vec<Network>);

impl Default for Networks {
	fn default() -> Self {
		Networks(vec![
			Network::new("celo", CELO_CHAIN_ID),
			Network::new("alfajores", ALFAJORES_CHAIN_ID),
			Network::new("baklava", BAKLAVA_CHAIN_ID),
		])
	}
}

impl Networks {
	/// Adds entries after the existing ones; earlier entries win lookups.
	pub fn extend<I: IntoIterator<Item = Network>>(&mut self, networks: I) {
		self.0.extend(networks);
	}

	pub fn iter(&self) -> impl Iterator<Item = &Network> {
		self.0.iter()
	}

	pub fn by_name(&self, name: &str) -> Option<&Network> {
		self.0.iter().find(|n| n.name == name)
	}

	pub fn by_chain_id(&self, chain_id: u64) -> Option<&Network> {
		self.0.iter().find(|n| n.chain_id == chain_id)
	}

	/// Entry for `chain_id`, or an `"unknown"` network carrying it.
	pub fn network_for_chain_id(&self, chain_id: u64) -> Network {
		self.by_chain_id(chain_id)
			.cloned()
			.unwrap_or_else(|| Network::new(UNKNOWN_NETWORK, chain_id))
	}

	/// Checks a caller supplied network against the registry.
	///
	/// Unknown name and chain id make a valid custom network. Otherwise both
	/// must point at the same registered entry.
	pub fn resolve(&self, network: &Network) -> Result<Network, Error> {
		match (self.by_name(&network.name), self.by_chain_id(network.chain_id)) {
			(None, None) => {
				trace!(target: "transaction", "Custom network {} ({})", network.name, network.chain_id);
				Ok(network.clone())
			}
			(Some(by_name), Some(by_chain_id)) if by_name == by_chain_id => Ok(by_name.clone()),
			_ => Err(Error::NetworkMismatch { name: network.name.clone(), chain_id: network.chain_id }),
		}
	}
}
