// This source is derived from Parity code
//
//! Eip 1559 transaction encoding

use ethereum_types::U256;
use rlp::RlpStream;

use super::{Action, AccessList, TransactionRequest, TransactionShared, TypedPayload};
use crate::error::Error;
use crate::Bytes;

pub const EIP1559_TX_TYPE: u8 = 0x02;

/// A set of information describing an externally-originating message call
/// or contract creation operation.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Eip1559Transaction {
	/// Simple replay attack protection
	pub chain_id: u64,
	/// Nonce.
	pub nonce: U256,
	/// Max priority fee per gas.
	pub max_priority_fee_per_gas: U256,
	/// Max fee per gas.
	pub max_fee_per_gas: U256,
	/// Gas paid up front for transaction execution.
	pub gas: U256,
	/// Action, can be either call or contract create.
	pub action: Action,
	/// Transfered value.
	pub value: U256,
	/// Transaction data.
	pub data: Bytes,
	/// Access list.
	pub access_list: AccessList,
}

impl Eip1559Transaction {
	pub(crate) fn from_request(request: &TransactionRequest) -> Result<Self, Error> {
		Ok(Eip1559Transaction {
			chain_id: request.chain_id.unwrap_or(0),
			nonce: request.nonce.unwrap_or_default(),
			max_priority_fee_per_gas: request.max_priority_fee_per_gas.unwrap_or_default(),
			max_fee_per_gas: request.max_fee_per_gas.unwrap_or_default(),
			gas: request.gas_limit.unwrap_or_default(),
			action: Action::from_request(request)?,
			value: request.value.unwrap_or_default(),
			data: request.data.clone().unwrap_or_default(),
			access_list: request.access_list.clone().unwrap_or_default(),
		})
	}
}

impl TypedPayload for Eip1559Transaction {
	const TX_TYPE: u8 = EIP1559_TX_TYPE;
	const PAYLOAD_LENGTH: usize = 9;

	fn rlp_append_fields(&self, s: &mut RlpStream) {
		s.append(&self.chain_id);
		s.append(&self.nonce);
		s.append(&self.max_priority_fee_per_gas);
		s.append(&self.max_fee_per_gas);
		s.append(&self.gas);
		s.append(&self.action);
		s.append(&self.value);
		s.append(&self.data);
		s.append(&self.access_list);
	}
}

impl TransactionShared for Eip1559Transaction {
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
