// This source is derived from Parity code
//
//! CIP-64 transactions: EIP-1559 with gas paid in an ERC-20 fee currency.

use std::ops::Deref;

use ethereum_types::{Address, U256};
use rlp::RlpStream;

use super::{append_address, Action, Eip1559Transaction, TransactionRequest, TransactionShared, TypedPayload};
use crate::error::Error;
use crate::field::{validate_address, TransactionField};
use crate::Bytes;

pub const CIP64_TX_TYPE: u8 = 0x7b;

/// EIP-1559 fields followed by the fee currency.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Cip64Transaction {
	pub inner: Eip1559Transaction,
	/// Token gas is paid in. Empty only on decoded transactions.
	pub fee_currency: Option<Address>,
}

impl Cip64Transaction {
	pub(crate) fn from_request(request: &TransactionRequest) -> Result<Self, Error> {
		Ok(Cip64Transaction {
			inner: Eip1559Transaction::from_request(request)?,
			fee_currency: validate_address(TransactionField::FeeCurrency, &request.fee_currency)?,
		})
	}
}

impl Deref for Cip64Transaction {
	type Target = Eip1559Transaction;

	fn deref(&self) -> &Self::Target {
		&self.inner
	}
}

impl TypedPayload for Cip64Transaction {
	const TX_TYPE: u8 = CIP64_TX_TYPE;
	const PAYLOAD_LENGTH: usize = Eip1559Transaction::PAYLOAD_LENGTH + 1;

	fn rlp_append_fields(&self, s: &mut RlpStream) {
		self.inner.rlp_append_fields(s);
		append_address(s, &self.fee_currency);
	}
}

impl TransactionShared for Cip64Transaction {
	fn chain_id(&self) -> u64 {
		self.inner.chain_id()
	}
	fn nonce(&self) -> U256 {
		self.inner.nonce()
	}
	fn action(&self) -> &Action {
		self.inner.action()
	}
	fn value(&self) -> U256 {
		self.inner.value()
	}
	fn data(&self) -> &Bytes {
		self.inner.data()
	}
}
