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
use std::ops::Deref;
use std::str::FromStr;
use ethereum_types::H256;
use rustc_hex::{FromHex, ToHex};
use secp256k1::constants::SECRET_KEY_SIZE;
use secp256k1::SecretKey;
use zeroize::Zeroize;
use crate::Error;

/// Private key material, wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
	inner: H256,
}

impl Drop for Secret {
	fn drop(&mut self) {
		self.inner.0.zeroize();
	}
}

impl ToHex for Secret {
	fn to_hex<T: std::iter::FromIterator<char>>(&self) -> T {
		self.inner.as_bytes().to_hex()
	}
}

impl fmt::LowerHex for Secret {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		fmt::LowerHex::fmt(&self.inner, fmt)
	}
}

impl fmt::Debug for Secret {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		write!(fmt, "Secret: 0x{:x}{:x}..{:x}{:x}", self.inner[0], self.inner[1], self.inner[30], self.inner[31])
	}
}

impl fmt::Display for Secret {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		write!(fmt, "Secret: 0x{:x}{:x}..{:x}{:x}", self.inner[0], self.inner[1], self.inner[30], self.inner[31])
	}
}

impl Secret {
	/// Creates a `Secret` from the given slice, returning `None` if the slice length != 32.
	pub fn from_slice(key: &[u8]) -> Option<Self> {
		if key.len() != 32 {
			return None
		}
		Some(Secret { inner: H256::from_slice(key) })
	}

	/// Creates zero key, which is invalid for crypto operations, but valid for math operation.
	pub fn zero() -> Self {
		Secret { inner: H256::zero() }
	}

	/// Imports and validates the key.
	pub fn from_unsafe_slice(key: &[u8]) -> Result<Self, Error> {
		let secret = SecretKey::from_slice(key)?;
		Ok(secret.into())
	}

	/// Checks validity of this key.
	pub fn check_validity(&self) -> Result<(), Error> {
		self.to_secp256k1_secret().map(|_| ())
	}

	/// Create `secp256k1::SecretKey` based on this secret
	pub fn to_secp256k1_secret(&self) -> Result<SecretKey, Error> {
		Ok(SecretKey::from_slice(self.inner.as_bytes())?)
	}
}

impl FromStr for Secret {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim_start_matches("0x");
		let bytes: Vec<u8> = s.from_hex().map_err(|e| Error::Custom(format!("{:?}", e)))?;
		Secret::from_slice(&bytes).ok_or(Error::InvalidSecret)
	}
}

impl From<[u8; 32]> for Secret {
	fn from(k: [u8; 32]) -> Self {
		Secret { inner: H256(k) }
	}
}

impl From<H256> for Secret {
	fn from(s: H256) -> Self {
		s.0.into()
	}
}

impl From<SecretKey> for Secret {
	fn from(key: SecretKey) -> Self {
		let mut a = [0; SECRET_KEY_SIZE];
		a.copy_from_slice(&key[..]);
		a.into()
	}
}

impl Deref for Secret {
	type Target = H256;

	fn deref(&self) -> &Self::Target {
		&self.inner
	}
}
