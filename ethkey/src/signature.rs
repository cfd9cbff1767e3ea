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
use ethereum_types::H256;
use rustc_hex::ToHex;
use secp256k1::recovery::{RecoverableSignature, RecoveryId};
use secp256k1::{Message as SecpMessage, Secp256k1};
use crate::{public_to_address, Address, Error, Message, Public, Secret};

/// Order of the secp256k1 curve.
const SECP256K1_N: [u8; 32] = [
	0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
	0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// `SECP256K1_N / 2`, upper bound of a "low" s value.
const SECP256K1_HALF_N: [u8; 32] = [
	0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
	0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// Signature encoded as RSV components, `v` being the bare recovery id (0 or 1).
#[repr(C)]
pub struct Signature([u8; 65]);

impl Signature {
	/// Get a slice into the 'r' portion of the data.
	pub fn r(&self) -> &[u8] {
		&self.0[0..32]
	}

	/// Get a slice into the 's' portion of the data.
	pub fn s(&self) -> &[u8] {
		&self.0[32..64]
	}

	/// Get the recovery byte.
	pub fn v(&self) -> u8 {
		self.0[64]
	}

	/// Encode the signature into RSV array (V altered to be in "Electrum" notation).
	pub fn into_electrum(mut self) -> [u8; 65] {
		self.0[64] += 27;
		self.0
	}

	/// Create a signature object from the sig.
	pub fn from_rsv(r: &H256, s: &H256, v: u8) -> Self {
		let mut sig = [0u8; 65];
		sig[0..32].copy_from_slice(r.as_bytes());
		sig[32..64].copy_from_slice(s.as_bytes());
		sig[64] = v;
		Signature(sig)
	}

	/// Check if this is a "low" signature.
	pub fn is_low_s(&self) -> bool {
		self.s() <= &SECP256K1_HALF_N[..]
	}

	/// Check if each component of the signature is in range.
	pub fn is_valid(&self) -> bool {
		let in_range = |x: &[u8]| x < &SECP256K1_N[..] && x.iter().any(|b| *b != 0);
		self.v() <= 1 && in_range(self.r()) && in_range(self.s())
	}
}

impl PartialEq for Signature {
	fn eq(&self, other: &Self) -> bool {
		self.0[..] == other.0[..]
	}
}

impl Eq for Signature {}

impl fmt::Debug for Signature {
	fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
		f.debug_struct("Signature")
			.field("r", &self.r().to_hex::<String>())
			.field("s", &self.s().to_hex::<String>())
			.field("v", &self.v())
			.finish()
	}
}

impl fmt::Display for Signature {
	fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
		write!(f, "{}", self.0[..].to_hex::<String>())
	}
}

impl Clone for Signature {
	fn clone(&self) -> Self {
		Signature(self.0)
	}
}

impl From<[u8; 65]> for Signature {
	fn from(s: [u8; 65]) -> Self {
		Signature(s)
	}
}

impl Deref for Signature {
	type Target = [u8; 65];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Signs a 32-byte digest, the recovery id ends up in the last byte.
pub fn sign(secret: &Secret, message: &Message) -> Result<Signature, Error> {
	let context = Secp256k1::signing_only();
	let msg = SecpMessage::from_slice(message.as_bytes())?;
	let sec = secret.to_secp256k1_secret()?;
	let (rec_id, data) = context.sign_recoverable(&msg, &sec).serialize_compact();
	let mut data_arr = [0; 65];

	// no need to check if s is low, it always is
	data_arr[0..64].copy_from_slice(&data);
	data_arr[64] = rec_id.to_i32() as u8;
	Ok(Signature(data_arr))
}

pub fn verify_address(address: &Address, signature: &Signature, message: &Message) -> Result<bool, Error> {
	let recovered_address = recover_address(signature, message)?;
	Ok(address == &recovered_address)
}

/// Public key that produced `signature` over `message`.
pub fn recover(signature: &Signature, message: &Message) -> Result<Public, Error> {
	let recovery_id = RecoveryId::from_i32(signature[64] as i32)?;
	let sig = RecoverableSignature::from_compact(&signature[0..64], recovery_id)?;
	let msg = SecpMessage::from_slice(message.as_bytes())?;
	let pubkey = Secp256k1::verification_only().recover(&msg, &sig).map_err(|e| {
		trace!(target: "ethkey", "public key recovery failed: {}", e);
		e
	})?;
	let serialized = pubkey.serialize_uncompressed();

	let mut public = Public::default();
	public.as_bytes_mut().copy_from_slice(&serialized[1..65]);
	Ok(public)
}

/// Recovers the signer's address rather than its public key.
pub fn recover_address(signature: &Signature, message: &Message) -> Result<Address, Error> {
	recover(signature, message).map(|public| public_to_address(&public))
}
