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


use std::fmt;
use rustc_hex::ToHex;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use crate::{Address, Error, Keccak256, Public, Secret};

/// Derives the 20-byte account address from an uncompressed public key.
pub fn public_to_address(public: &Public) -> Address {
	let hash = public.keccak256();
	let mut result = Address::default();
	result.as_bytes_mut().copy_from_slice(&hash[12..]);
	result
}

fn public_from_secp256k1(publ: &PublicKey) -> Public {
	let serialized = publ.serialize_uncompressed();
	let mut public = Public::default();
	public.as_bytes_mut().copy_from_slice(&serialized[1..65]);
	public
}

#[derive(Debug, Clone, PartialEq)]
/// secp256k1 key pair
pub struct KeyPair {
	secret: Secret,
	public: Public,
}

impl fmt::Display for KeyPair {
	fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
		writeln!(f, "secret:  {:x}", self.secret)?;
		writeln!(f, "public:  {}", self.public.as_bytes().to_hex::<String>())?;
		write!(f, "address: {}", self.address().as_bytes().to_hex::<String>())
	}
}

impl KeyPair {
	/// Create a pair from secret key
	pub fn from_secret(secret: Secret) -> Result<KeyPair, Error> {
		let context = Secp256k1::signing_only();
		let s = secret.to_secp256k1_secret()?;
		let pub_key = PublicKey::from_secret_key(&context, &s);

		Ok(KeyPair {
			secret,
			public: public_from_secp256k1(&pub_key),
		})
	}

	pub fn from_secret_slice(slice: &[u8]) -> Result<KeyPair, Error> {
		Self::from_secret(Secret::from_unsafe_slice(slice)?)
	}

	pub fn from_keypair(sec: SecretKey, publ: PublicKey) -> Self {
		KeyPair {
			secret: sec.into(),
			public: public_from_secp256k1(&publ),
		}
	}

	pub fn secret(&self) -> &Secret {
		&self.secret
	}

	pub fn public(&self) -> &Public {
		&self.public
	}

	pub fn address(&self) -> Address {
		public_to_address(&self.public)
	}
}
