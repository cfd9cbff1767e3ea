// This source is derived from Parity code
//
//! CIP-66 transactions: CIP-64 with a cap on the total fee in fee currency.

use std::ops::Deref;

use ethereum_types::U256;
use rlp::RlpStream;

use super::{Action, Cip64Transaction, TransactionRequest, TransactionShared, TypedPayload};
use crate::error::Error;
use crate::Bytes;

pub const CIP66_TX_TYPE: u8 = 0x7a;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Cip66Transaction {
	pub inner: Cip64Transaction,
	/// Most the sender pays in fee currency, whatever the conversion rate.
	pub max_fee_in_fee_currency: U256,
}

impl Cip66Transaction {
	pub(crate) fn from_request(request: &TransactionRequest) -> Result<Self, Error> {
		Ok(Cip66Transaction {
			inner: Cip64Transaction::from_request(request)?,
			max_fee_in_fee_currency: request.max_fee_in_fee_currency.unwrap_or_default(),
		})
	}
}

impl Deref for Cip66Transaction {
	type Target = Cip64Transaction;

	fn deref(&self) -> &Self::Target {
		&self.inner
	}
}

impl TypedPayload for Cip66Transaction {
	const TX_TYPE: u8 = CIP66_TX_TYPE;
	const PAYLOAD_LENGTH: usize = Cip64Transaction::PAYLOAD_LENGTH + 1;

	fn rlp_append_fields(&self, s: &mut RlpStream) {
		self.inner.rlp_append_fields(s);
		s.append(&self.max_fee_in_fee_currency);
	}
}

impl TransactionShared for Cip66Transaction {
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

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::AddressField;
	use ethereum_types::Address;
	use rustc_hex::FromHex;
	use std::str::FromStr;

	#[test]
	fn unsigned_fixture() {
		let request = TransactionRequest {
			to: Some(Address::from_str("F653A42ef024d174Bb4bE98B67690E5886d01F5F").unwrap().into()),
			chain_id: Some(42220),
			nonce: Some(1.into()),
			fee_currency: Some(AddressField::Address(
				Address::from_str("765de816845861e75a25fca122bb6898b8b1282a").unwrap(),
			)),
			value: Some(U256::from(1_000_000_000_000_000_000u64)),
			max_fee_per_gas: Some(2_000_000_000u64.into()),
			max_priority_fee_per_gas: Some(2_000_000_000u64.into()),
			max_fee_in_fee_currency: Some(12_345_000_000_000u64.into()),
			..Default::default()
		};
		let tx = Cip66Transaction::from_request(&request).unwrap();
		let mut s = RlpStream::new();
		tx.rlp_append_unsigned_transaction(&mut s);

		let expected: Vec<u8> = "7af84b82a4ec01847735940084773594008094f653a42ef024d174bb4be98b67690e5886d01f5f880de0b6b3a764000080c094765de816845861e75a25fca122bb6898b8b1282a860b3a4b56fa00".from_hex().unwrap();
		assert_eq!(s.out().to_vec(), expected);
		assert_eq!(tx.fee_currency, Some(Address::from_str("765de816845861e75a25fca122bb6898b8b1282a").unwrap()));
	}
}
