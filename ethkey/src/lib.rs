// Copyright 2015-2018 Parity Technologies (UK) Ltd.
// This file is part of Parity.

// Parity is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// Parity is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with Parity.  If not, see <http://www.gnu.org/licenses/>.


//! Secp256k1 keys, recoverable signatures and the address scheme Celo shares
//! with Ethereum.

extern crate ethereum_types;
extern crate rand;
extern crate rustc_hex;
extern crate secp256k1;
extern crate tiny_keccak;
extern crate zeroize;

#[macro_use]
extern crate log;

mod checksum;
mod error;
mod keccak;
mod keypair;
mod random;
mod secret;
mod signature;

pub use self::checksum::to_checksum_address;
pub use self::error::Error;
pub use self::keccak::Keccak256;
pub use self::keypair::{public_to_address, KeyPair};
pub use self::random::Random;
pub use self::secret::Secret;
pub use self::signature::{recover, recover_address, sign, verify_address, Signature};

use ethereum_types::{H256, H512};

pub use ethereum_types::Address;

/// Uncompressed secp256k1 public key without the `0x04` tag byte.
pub type Public = H512;
/// 32-byte digest that gets signed.
pub type Message = H256;

/// Uninstantiatable error type for infallible generators.
#[derive(Debug)]
pub enum Void {}

/// Generates new keypair.
pub trait Generator {
	type Error;

	/// Should be called to generate new keypair.
	fn generate(&mut self) -> Result<KeyPair, Self::Error>;
}
