// This source is derived from Parity code
//
//! Untyped legacy transaction and EIP-155 replay protection.

use ethereum_types::U256;
use rlp::RlpStream;

use super::{Action, TransactionRequest, TransactionShared};
use crate::error::Error;
use crate::signature::SealedSignature;
use crate::Bytes;

/// A set of information describing an externally-originating message call
/// or contract creation operation.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct LegacyTransaction {
	/// EIP-155 chain id, 0 when the transaction isn't replay protected.
	pub chain_id: u64,
	/// Nonce.
	pub nonce: U256,
	/// Gas price.
	pub gas_price: U256,
	/// Gas paid up front for transaction execution.
	pub gas: U256,
	/// Action, can be either call or contract create.
	pub action: Action,
	/// Transfered value.
	pub value: U256,
	/// Transaction data.
	pub data: Bytes,
}

impl LegacyTransaction {
	/// Items of the signed form.
	pub const SEALED_LENGTH: usize = 9;

	pub(crate) fn from_request(request: &TransactionRequest) -> Result<Self, Error> {
		Ok(LegacyTransaction {
			chain_id: request.chain_id.unwrap_or(0),
			nonce: request.nonce.unwrap_or_default(),
			gas_price: request.gas_price.unwrap_or_default(),
			gas: request.gas_limit.unwrap_or_default(),
			action: Action::from_request(request)?,
			value: request.value.unwrap_or_default(),
			data: request.data.clone().unwrap_or_default(),
		})
	}

	/// tx list item count, the EIP-155 triple included
	fn unsigned_payload_length(&self) -> usize {
		if self.chain_id == 0 { 6 } else { 9 }
	}

	fn rlp_append_fields(&self, s: &mut RlpStream) {
		s.append(&self.nonce);
		s.append(&self.gas_price);
		s.append(&self.gas);
		s.append(&self.action);
		s.append(&self.value);
		s.append(&self.data);
	}

	/// Append object with a without signature into RLP stream
	pub(crate) fn rlp_append_unsigned_transaction(&self, s: &mut RlpStream) {
		s.begin_list(self.unsigned_payload_length());
		self.rlp_append_fields(s);
		if self.chain_id != 0 {
			s.append(&self.chain_id);
			s.append_empty_data();
			s.append_empty_data();
		}
	}

	/// Append object with a signature into RLP stream
	pub(crate) fn rlp_append_sealed_transaction(&self, s: &mut RlpStream, signature: &SealedSignature) {
		s.begin_list(Self::SEALED_LENGTH);
		self.rlp_append_fields(s);
		signature.rlp_append_vrs(s);
	}

	/// Network `v` for a signature with the given recovery parameter.
	pub fn network_v(&self, recovery_param: u8) -> Result<u64, Error> {
		eip155_methods::add_chain_replay_protection(recovery_param, self.chain_id).ok_or(Error::InvalidChainId)
	}
}

impl TransactionShared for LegacyTransaction {
	fn chain_id(&self) -> u64 {
		self.chain_id
	}
	fn nonce(&self) -> U256 {
		self.nonce
	}
	fn action(&self) -> &Action {
		&self.action
	}
	fn value(&self) -> U256 {
		self.value
	}
	fn data(&self) -> &Bytes {
		&self.data
	}
}

/// Replay protection logic for v part of transaction's signature
pub mod eip155_methods {
	/// `v` of an unprotected signature with recovery parameter 0.
	pub const BASE_V: u64 = 27;
	/// Offset of EIP-155 `v` values, `chain_id * 2 + 35`.
	pub const EIP155_V: u64 = 35;

	/// Adds chain id into v: `27 + recovery`, plus `chain_id * 2 + 8` when
	/// `chain_id` isn't 0. `None` on overflow.
	pub fn add_chain_replay_protection(recovery_param: u8, chain_id: u64) -> Option<u64> {
		let v = BASE_V + u64::from(recovery_param);
		if chain_id == 0 {
			return Some(v);
		}
		chain_id.checked_mul(2)?.checked_add(EIP155_V - BASE_V)?.checked_add(v)
	}

	/// Chain id carried by a signed `v`, 0 for pre-EIP-155 values.
	pub fn chain_id_from_v(v: u64) -> u64 {
		if v >= EIP155_V { (v - EIP155_V) / 2 } else { 0 }
	}

	/// Bare recovery parameter, `None` if `v` doesn't reduce to 0 or 1.
	pub fn recovery_param_from_v(v: u64, chain_id: u64) -> Option<u8> {
		let offset = add_chain_replay_protection(0, chain_id)?;
		match v.checked_sub(offset)? {
			param @ 0..=1 => Some(param as u8),
			_ => None,
		}
	}

	/// Chain id implied by the `v` of a signature supplied without one.
	/// `v` above 28 must be EIP-155 encoded.
	pub fn chain_id_for_signature(v: u64) -> Option<u64> {
		if v > BASE_V + 1 {
			v.checked_sub(EIP155_V).map(|x| x / 2)
		} else {
			Some(0)
		}
	}
}
