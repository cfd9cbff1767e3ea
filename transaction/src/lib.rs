// This source is derived from Parity code
//
//! Celo transaction encoding and decoding.
//!
//! Four wire formats share one logical record, [`TransactionRequest`]:
//!
//! * untyped legacy, `rlp([nonce, gasPrice, gasLimit, to, value, data, v, r, s])`;
//! * EIP-1559, prefixed with `0x02`;
//! * CIP-64, prefixed with `0x7b`, paying gas in an ERC-20 `feeCurrency`;
//! * CIP-66, prefixed with `0x7a`, CIP-64 plus a `maxFeeInFeeCurrency` cap.
//!
//! The variant is never picked by the caller. [`TypedTransaction::classify`]
//! derives it from which fields are populated and narrows the request to the
//! fields that variant carries.

extern crate ethereum_types;
extern crate ethkey;
extern crate hash;
extern crate rlp;
extern crate rustc_hex;
extern crate serde;

#[cfg(test)]
extern crate serde_json;

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod codec;
mod error;
mod field;
pub mod networks;
mod signature;
mod transaction;

pub use self::codec::{
	parse_transaction, serialize_fields, serialize_transaction, sign_transaction, signing_hash,
	ParsedSignature, Sender, Transaction,
};
pub use self::error::Error;
pub use self::field::{AddressField, FieldKind, FieldValue, TransactionField};
pub use self::signature::{SealedSignature, SignatureComponents};
pub use self::transaction::{
	eip155_methods, AccessList, AccessListItem, Action, Cip64Transaction, Cip66Transaction,
	Eip1559Transaction, LegacyTransaction, TransactionRequest, TransactionRequestBuilder,
	TransactionShared, TxType, TypedTransaction, CIP64_TX_TYPE, CIP66_TX_TYPE, EIP1559_TX_TYPE,
};

pub type Bytes = Vec<u8>;
