// This source is derived from Parity code
//
//! Codec errors.

use std::{error, fmt};

use rlp::DecoderError;

use crate::field::TransactionField;
use crate::transaction::TxType;

/// Errors raised while formatting, serializing or parsing a transaction.
///
/// Signer recovery problems are not errors: a parsed transaction reports
/// them through [`crate::Sender::Unrecoverable`].
#[derive(Debug, PartialEq, Clone)]
pub enum Error {
	/// Property name outside of the transaction allow-list.
	UnknownProperty(String),
	/// Fixed-width field holding a non-empty value of the wrong size.
	InvalidFieldLength {
		field: TransactionField,
		expected: usize,
		found: usize,
	},
	/// Variable-width field still too long once leading zeros are stripped.
	FieldTooLong {
		field: TransactionField,
		max: usize,
		found: usize,
	},
	/// Value of the wrong shape for the field, e.g. bytes given as an access list.
	InvalidFieldValue(TransactionField),
	/// Chain id that doesn't fit in a `u64`, or can't be derived from `v`.
	InvalidChainId,
	/// Wire bytes are not well-formed RLP.
	InvalidRawTransaction(DecoderError),
	/// Leading byte is neither an RLP list nor a known transaction type.
	UnsupportedTxType(u8),
	/// RLP item count doesn't match the layout of the transaction type.
	InvalidItemCount {
		tx_type: TxType,
		found: usize,
	},
	/// Supplied `v` disagrees with the chain id and the recovery parameter.
	SignatureMismatch {
		expected: u64,
		found: u64,
	},
	/// Signature can't be normalized.
	InvalidSignature(String),
	/// Key or curve failure while signing.
	Crypto(String),
	/// Network name and chain id point at different known networks.
	NetworkMismatch {
		name: String,
		chain_id: u64,
	},
}

impl Error {
	/// Malformed input on the encoding side.
	pub fn is_validation(&self) -> bool {
		match *self {
			Error::UnknownProperty(_)
			| Error::InvalidFieldLength { .. }
			| Error::FieldTooLong { .. }
			| Error::InvalidFieldValue(_)
			| Error::InvalidChainId => true,
			_ => false,
		}
	}

	/// Wire bytes that can't be a transaction.
	pub fn is_malformed(&self) -> bool {
		match *self {
			Error::InvalidRawTransaction(_)
			| Error::UnsupportedTxType(_)
			| Error::InvalidItemCount { .. } => true,
			_ => false,
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Error::*;
		let msg = match *self {
			UnknownProperty(ref name) => format!("invalid transaction key: {}", name),
			InvalidFieldLength { field, expected, found } => format!(
				"invalid length for {}: expected {} bytes, got {}",
				field, expected, found
			),
			FieldTooLong { field, max, found } => format!(
				"invalid length for {}: at most {} bytes, got {}",
				field, max, found
			),
			InvalidFieldValue(field) => format!("invalid value for {}", field),
			InvalidChainId => "invalid transaction.chainId".into(),
			InvalidRawTransaction(ref err) => format!("invalid raw transaction: {}", err),
			UnsupportedTxType(ty) => format!("unsupported transaction type 0x{:02x}", ty),
			InvalidItemCount { tx_type, found } => format!(
				"invalid raw transaction: {} items for a {} transaction",
				found, tx_type
			),
			SignatureMismatch { expected, found } => format!(
				"transaction.chainId/signature.v mismatch: expected v = {}, got {}",
				expected, found
			),
			InvalidSignature(ref msg) => format!("invalid signature: {}", msg),
			Crypto(ref msg) => format!("crypto error: {}", msg),
			NetworkMismatch { ref name, chain_id } => {
				format!("network chainId mismatch: {} / {}", name, chain_id)
			}
		};

		f.write_fmt(format_args!("Transaction error ({})", msg))
	}
}

impl error::Error for Error {}

impl From<DecoderError> for Error {
	fn from(err: DecoderError) -> Self {
		Error::InvalidRawTransaction(err)
	}
}

impl From<ethkey::Error> for Error {
	fn from(err: ethkey::Error) -> Self {
		Error::Crypto(format!("{}", err))
	}
}
