// This source is derived from Parity code
//
//! Signature normalization.

use ethereum_types::{H256, U256};
use ethkey::Signature;
use rlp::RlpStream;

use crate::error::Error;

/// `(r, s, recoveryParam, v)` with `v` in 27/28 or EIP-155 form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureComponents {
	pub r: H256,
	pub s: H256,
	/// Y parity of the curve point, 0 or 1.
	pub recovery_param: u8,
	pub v: u64,
}

impl SignatureComponents {
	/// Accepts a bare parity (0, 1), an unprotected `v` (27, 28) or an
	/// EIP-155 `v`.
	pub fn from_rsv(r: H256, s: H256, v: u64) -> Result<Self, Error> {
		let (recovery_param, v) = match v {
			0 | 1 => (v as u8, v + 27),
			27..=u64::MAX => ((1 - v % 2) as u8, v),
			_ => return Err(Error::InvalidSignature(format!("v = {} is out of range", v))),
		};
		Ok(SignatureComponents { r, s, recovery_param, v })
	}

	/// EIP-2098 compact form, parity stored in the top bit of `s`.
	pub fn from_compact(r: H256, y_parity_and_s: H256) -> Self {
		let mut s = y_parity_and_s;
		let recovery_param = s.as_bytes()[0] >> 7;
		s.as_bytes_mut()[0] &= 0x7f;
		SignatureComponents { r, s, recovery_param, v: 27 + u64::from(recovery_param) }
	}

	/// 65-byte `r ‖ s ‖ v` or 64-byte compact signature.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
		match bytes.len() {
			65 => SignatureComponents::from_rsv(
				H256::from_slice(&bytes[0..32]),
				H256::from_slice(&bytes[32..64]),
				u64::from(bytes[64]),
			),
			64 => Ok(SignatureComponents::from_compact(
				H256::from_slice(&bytes[0..32]),
				H256::from_slice(&bytes[32..64]),
			)),
			len => Err(Error::InvalidSignature(format!("{} bytes", len))),
		}
	}

	pub fn to_ethkey(&self) -> Signature {
		Signature::from_rsv(&self.r, &self.s, self.recovery_param)
	}
}

impl From<Signature> for SignatureComponents {
	fn from(sig: Signature) -> Self {
		SignatureComponents {
			r: H256::from_slice(sig.r()),
			s: H256::from_slice(sig.s()),
			recovery_param: sig.v(),
			v: 27 + u64::from(sig.v()),
		}
	}
}

/// The `v`, `r` and `s` items closing a signed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SealedSignature {
	/// The V field of the signature, recovery parameter or EIP-155 value.
	pub v: u64,
	/// The R field of the signature; helps describe the point on the curve.
	pub r: U256,
	/// The S field of the signature; helps describe the point on the curve.
	pub s: U256,
}

impl SealedSignature {
	pub(crate) fn rlp_append_vrs(&self, s: &mut RlpStream) {
		s.append(&self.v);
		s.append(&self.r);
		s.append(&self.s);
	}
}
