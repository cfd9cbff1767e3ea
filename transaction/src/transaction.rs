// This source is derived from Parity code
//
//! Transaction data structures and variant selection.

use std::fmt;

use ethereum_types::{Address, H256, U256};
use hash::keccak;
use rlp::{self, RlpStream};

use crate::error::Error;
use crate::field::{validate_address, TransactionField};
use crate::signature::{SealedSignature, SignatureComponents};
use crate::Bytes;

mod access_list;
pub use self::access_list::{AccessList, AccessListItem};

mod legacy;
pub use self::legacy::{eip155_methods, LegacyTransaction};

mod eip1559;
pub use self::eip1559::{Eip1559Transaction, EIP1559_TX_TYPE};

mod cip64;
pub use self::cip64::{Cip64Transaction, CIP64_TX_TYPE};

mod cip66;
pub use self::cip66::{Cip66Transaction, CIP66_TX_TYPE};

mod request;
pub use self::request::{TransactionRequest, TransactionRequestBuilder};

/// Transaction action type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
	/// Create creates new contract.
	Create,
	/// Calls contract at given address.
	/// In the case of a transfer, this is the receiver's address.'
	Call(Address),
}

impl Default for Action {
	fn default() -> Action {
		Action::Create
	}
}

impl Action {
	/// Validated `to` of a request; an absent recipient creates a contract.
	pub(crate) fn from_request(request: &TransactionRequest) -> Result<Self, Error> {
		Ok(match validate_address(TransactionField::To, &request.to)? {
			Some(address) => Action::Call(address),
			None => Action::Create,
		})
	}
}

impl rlp::Encodable for Action {
	fn rlp_append(&self, s: &mut RlpStream) {
		match *self {
			Action::Create => s.append_internal(&""),
			Action::Call(ref addr) => s.append_internal(addr),
		};
	}
}

/// Wire variants, in the order the dispatcher tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxType {
	/// Untyped, optionally EIP-155 protected.
	Legacy,
	/// `0x02` fee market transaction.
	Eip1559,
	/// `0x7b` fee market transaction paid in `feeCurrency`.
	Cip64,
	/// `0x7a` CIP-64 with a `maxFeeInFeeCurrency` cap.
	Cip66,
}

const LEGACY_FIELDS: &[TransactionField] = &[
	TransactionField::Nonce,
	TransactionField::GasPrice,
	TransactionField::GasLimit,
	TransactionField::To,
	TransactionField::Value,
	TransactionField::Data,
];

const CIP66_FIELDS: &[TransactionField] = &[
	TransactionField::ChainId,
	TransactionField::Nonce,
	TransactionField::MaxPriorityFeePerGas,
	TransactionField::MaxFeePerGas,
	TransactionField::GasLimit,
	TransactionField::To,
	TransactionField::Value,
	TransactionField::Data,
	TransactionField::AccessList,
	TransactionField::FeeCurrency,
	TransactionField::MaxFeeInFeeCurrency,
];

impl TxType {
	/// Envelope byte, `None` for legacy.
	pub fn prefix(&self) -> Option<u8> {
		match *self {
			TxType::Legacy => None,
			TxType::Eip1559 => Some(EIP1559_TX_TYPE),
			TxType::Cip64 => Some(CIP64_TX_TYPE),
			TxType::Cip66 => Some(CIP66_TX_TYPE),
		}
	}

	/// Typed variant for an envelope byte.
	pub fn from_prefix(prefix: u8) -> Option<Self> {
		match prefix {
			EIP1559_TX_TYPE => Some(TxType::Eip1559),
			CIP64_TX_TYPE => Some(TxType::Cip64),
			CIP66_TX_TYPE => Some(TxType::Cip66),
			_ => None,
		}
	}

	/// Numeric type id as reported on parsed transactions, 0 for legacy.
	pub fn id(&self) -> u8 {
		self.prefix().unwrap_or(0)
	}

	/// Fields carried ahead of the signature, in wire order. Legacy omits its
	/// EIP-155 `[chainId, "", ""]` tail.
	pub fn fields(&self) -> &'static [TransactionField] {
		match *self {
			TxType::Legacy => LEGACY_FIELDS,
			TxType::Eip1559 => &CIP66_FIELDS[..9],
			TxType::Cip64 => &CIP66_FIELDS[..10],
			TxType::Cip66 => CIP66_FIELDS,
		}
	}

	/// RLP items of the unsigned form. Legacy without chain id has 6.
	pub fn unsigned_item_count(&self) -> usize {
		match *self {
			TxType::Legacy => 9,
			_ => self.fields().len(),
		}
	}

	/// RLP items of the signed form.
	pub fn signed_item_count(&self) -> usize {
		self.fields().len() + 3
	}

	/// Picks the variant from the fields a request populates. First match wins.
	pub fn select(request: &TransactionRequest) -> Self {
		if request.has_fee_currency() && request.has_max_fee_in_fee_currency() {
			TxType::Cip66
		} else if request.has_fee_currency() {
			TxType::Cip64
		} else if request.has_fee_market() || request.has_access_list() {
			TxType::Eip1559
		} else {
			TxType::Legacy
		}
	}
}

impl fmt::Display for TxType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(match *self {
			TxType::Legacy => "legacy",
			TxType::Eip1559 => "EIP-1559",
			TxType::Cip64 => "CIP-64",
			TxType::Cip66 => "CIP-66",
		})
	}
}

/// Methods common for all tx versions
pub trait TransactionShared {
	fn chain_id(&self) -> u64;

	fn nonce(&self) -> U256;

	fn action(&self) -> &Action;

	fn value(&self) -> U256;

	fn data(&self) -> &Bytes;
}

/// Envelope handling shared by the `0x02`, `0x7b` and `0x7a` variants.
pub(crate) trait TypedPayload {
	const TX_TYPE: u8;
	/// Items ahead of the signature.
	const PAYLOAD_LENGTH: usize;

	/// Appends the fields without a list header.
	fn rlp_append_fields(&self, s: &mut RlpStream);

	/// Append object with a without signature into RLP stream
	fn rlp_append_unsigned_transaction(&self, s: &mut RlpStream) {
		s.append(&Self::TX_TYPE);
		s.begin_list(Self::PAYLOAD_LENGTH);
		self.rlp_append_fields(s);
	}

	/// Append object with a signature into RLP stream
	fn rlp_append_sealed_transaction(&self, s: &mut RlpStream, signature: &SealedSignature) {
		s.append(&Self::TX_TYPE);
		s.begin_list(Self::PAYLOAD_LENGTH + 3);
		self.rlp_append_fields(s);
		signature.rlp_append_vrs(s);
	}
}

/// Appends an optional address, empty when absent.
pub(crate) fn append_address(s: &mut RlpStream, address: &Option<Address>) {
	match *address {
		Some(ref address) => s.append(address),
		None => s.append_empty_data(),
	};
}

/// A request narrowed to the fields of its wire variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedTransaction {
	Legacy(LegacyTransaction),
	Eip1559(Eip1559Transaction),
	Cip64(Cip64Transaction),
	Cip66(Cip66Transaction),
}

impl TypedTransaction {
	/// Runs the dispatcher over `request`. Fields the chosen variant doesn't
	/// carry are dropped, e.g. `gasPrice` on fee market transactions.
	pub fn classify(request: &TransactionRequest) -> Result<Self, Error> {
		let tx_type = TxType::select(request);
		trace!(target: "transaction", "Classified request as {}", tx_type);
		TypedTransaction::from_request(tx_type, request)
	}

	/// Narrows `request` to `tx_type` without consulting the dispatcher.
	/// Address fields are validated, absent values take their empty form.
	pub fn from_request(tx_type: TxType, request: &TransactionRequest) -> Result<Self, Error> {
		Ok(match tx_type {
			TxType::Legacy => TypedTransaction::Legacy(LegacyTransaction::from_request(request)?),
			TxType::Eip1559 => TypedTransaction::Eip1559(Eip1559Transaction::from_request(request)?),
			TxType::Cip64 => TypedTransaction::Cip64(Cip64Transaction::from_request(request)?),
			TxType::Cip66 => TypedTransaction::Cip66(Cip66Transaction::from_request(request)?),
		})
	}

	pub fn tx_type(&self) -> TxType {
		match *self {
			TypedTransaction::Legacy(_) => TxType::Legacy,
			TypedTransaction::Eip1559(_) => TxType::Eip1559,
			TypedTransaction::Cip64(_) => TxType::Cip64,
			TypedTransaction::Cip66(_) => TxType::Cip66,
		}
	}

	/// Fields every variant carries.
	pub fn shared(&self) -> &dyn TransactionShared {
		match *self {
			TypedTransaction::Legacy(ref tx) => tx,
			TypedTransaction::Eip1559(ref tx) => tx,
			TypedTransaction::Cip64(ref tx) => tx,
			TypedTransaction::Cip66(ref tx) => tx,
		}
	}

	pub fn chain_id(&self) -> u64 {
		self.shared().chain_id()
	}

	/// Unsigned wire form, type prefix included.
	pub fn unsigned_rlp(&self) -> Bytes {
		let mut s = RlpStream::new();
		match *self {
			TypedTransaction::Legacy(ref tx) => tx.rlp_append_unsigned_transaction(&mut s),
			TypedTransaction::Eip1559(ref tx) => tx.rlp_append_unsigned_transaction(&mut s),
			TypedTransaction::Cip64(ref tx) => tx.rlp_append_unsigned_transaction(&mut s),
			TypedTransaction::Cip66(ref tx) => tx.rlp_append_unsigned_transaction(&mut s),
		}
		s.out().to_vec()
	}

	/// The message hash of the transaction.
	pub fn signing_hash(&self) -> H256 {
		keccak(self.unsigned_rlp())
	}

	/// Network form of `signature` for this variant. Typed variants carry the
	/// bare recovery parameter, legacy the EIP-155 `v`.
	pub fn seal(&self, signature: &SignatureComponents) -> Result<SealedSignature, Error> {
		let v = match *self {
			TypedTransaction::Legacy(ref tx) => {
				let v = tx.network_v(signature.recovery_param)?;
				// an unprotected `v` can't contradict a chain id it never named
				let checked = tx.chain_id == 0 || signature.v > eip155_methods::BASE_V + 1;
				if checked && signature.v != v {
					return Err(Error::SignatureMismatch { expected: v, found: signature.v });
				}
				v
			}
			_ => u64::from(signature.recovery_param),
		};

		Ok(SealedSignature {
			v,
			r: U256::from_big_endian(signature.r.as_bytes()),
			s: U256::from_big_endian(signature.s.as_bytes()),
		})
	}

	/// Signed wire form, type prefix included.
	pub fn sealed_rlp(&self, signature: &SealedSignature) -> Bytes {
		let mut s = RlpStream::new();
		match *self {
			TypedTransaction::Legacy(ref tx) => tx.rlp_append_sealed_transaction(&mut s, signature),
			TypedTransaction::Eip1559(ref tx) => tx.rlp_append_sealed_transaction(&mut s, signature),
			TypedTransaction::Cip64(ref tx) => tx.rlp_append_sealed_transaction(&mut s, signature),
			TypedTransaction::Cip66(ref tx) => tx.rlp_append_sealed_transaction(&mut s, signature),
		}
		s.out().to_vec()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::AddressField;

	fn fee_currency() -> AddressField {
		AddressField::Address(Address::from_low_u64_be(0x765d))
	}

	#[test]
	fn decision_order() {
		let legacy = TransactionRequest { gas_price: Some(1.into()), ..Default::default() };
		assert_eq!(TxType::select(&legacy), TxType::Legacy);

		let eip1559 = TransactionRequest {
			max_fee_per_gas: Some(2.into()),
			max_priority_fee_per_gas: Some(1.into()),
			..legacy.clone()
		};
		assert_eq!(TxType::select(&eip1559), TxType::Eip1559);

		let cip64 = TransactionRequest { fee_currency: Some(fee_currency()), ..eip1559.clone() };
		assert_eq!(TxType::select(&cip64), TxType::Cip64);

		let cip66 = TransactionRequest { max_fee_in_fee_currency: Some(3.into()), ..cip64.clone() };
		assert_eq!(TxType::select(&cip66), TxType::Cip66);

		// the cap alone means nothing without a fee currency
		let capped = TransactionRequest { max_fee_in_fee_currency: Some(3.into()), ..eip1559 };
		assert_eq!(TxType::select(&capped), TxType::Eip1559);
	}

	#[test]
	fn zero_fees_are_absent() {
		let request = TransactionRequest {
			max_fee_per_gas: Some(0.into()),
			max_priority_fee_per_gas: Some(1.into()),
			..Default::default()
		};
		assert_eq!(TxType::select(&request), TxType::Legacy);
	}

	#[test]
	fn access_list_needs_a_typed_envelope() {
		let request = TransactionRequest { access_list: Some(AccessList::default()), ..Default::default() };
		assert_eq!(TxType::select(&request), TxType::Eip1559);
	}

	#[test]
	fn fee_market_drops_gas_price() {
		let request = TransactionRequest {
			gas_price: Some(7.into()),
			max_fee_per_gas: Some(2.into()),
			max_priority_fee_per_gas: Some(1.into()),
			..Default::default()
		};
		let with_price = TypedTransaction::classify(&request).unwrap();
		let without_price =
			TypedTransaction::classify(&TransactionRequest { gas_price: None, ..request }).unwrap();
		assert_eq!(with_price.tx_type(), TxType::Eip1559);
		assert_eq!(with_price.unsigned_rlp(), without_price.unsigned_rlp());
	}

	#[test]
	fn prefixes() {
		let base = TransactionRequest {
			max_fee_per_gas: Some(2.into()),
			max_priority_fee_per_gas: Some(1.into()),
			..Default::default()
		};
		assert_eq!(TypedTransaction::classify(&base).unwrap().unsigned_rlp()[0], 0x02);

		let cip64 = TransactionRequest { fee_currency: Some(fee_currency()), ..base };
		assert_eq!(TypedTransaction::classify(&cip64).unwrap().unsigned_rlp()[0], 0x7b);

		let cip66 = TransactionRequest { max_fee_in_fee_currency: Some(1.into()), ..cip64 };
		assert_eq!(TypedTransaction::classify(&cip66).unwrap().unsigned_rlp()[0], 0x7a);

		assert!(TypedTransaction::classify(&TransactionRequest::default()).unwrap().unsigned_rlp()[0] >= 0xc0);
	}

	#[test]
	fn layouts() {
		assert_eq!(TxType::Legacy.fields().len(), 6);
		assert_eq!(TxType::Cip64.fields().last(), Some(&TransactionField::FeeCurrency));
		let counts: Vec<_> = [TxType::Legacy, TxType::Eip1559, TxType::Cip64, TxType::Cip66]
			.iter()
			.map(|t| (t.unsigned_item_count(), t.signed_item_count()))
			.collect();
		assert_eq!(counts, vec![(9, 9), (9, 12), (10, 13), (11, 14)]);
		assert_eq!(TxType::from_prefix(0x7a), Some(TxType::Cip66));
		assert_eq!(TxType::from_prefix(0x01), None);
		assert_eq!(TxType::Cip66.id(), 122);
	}

	#[test]
	fn invalid_recipient_is_rejected() {
		let request = TransactionRequest { to: Some(AddressField::Raw(vec![0x11; 19])), ..Default::default() };
		assert_eq!(
			TypedTransaction::classify(&request),
			Err(Error::InvalidFieldLength { field: TransactionField::To, expected: 20, found: 19 })
		);
	}

	#[test]
	fn legacy_v_mismatch() {
		let tx = TypedTransaction::classify(&TransactionRequest { chain_id: Some(1), ..Default::default() }).unwrap();
		let r = H256::from_low_u64_be(1);
		let ok = SignatureComponents::from_rsv(r, r, 38).unwrap();
		assert_eq!(tx.seal(&ok).unwrap().v, 38);

		let unprotected = SignatureComponents::from_rsv(r, r, 28).unwrap();
		assert_eq!(tx.seal(&unprotected).unwrap().v, 38);

		let other_chain = SignatureComponents::from_rsv(r, r, 40).unwrap();
		assert_eq!(
			tx.seal(&other_chain),
			Err(Error::SignatureMismatch { expected: 38, found: 40 })
		);
	}
}
