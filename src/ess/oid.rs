//! Object identifiers used by the Enhanced Security Services.

use crate::oid::{ConstOid, Oid};


/// `id-ct-receipt`, the content type of signed receipts.
pub const CT_RECEIPT: ConstOid = Oid(
    &[42, 134, 72, 134, 247, 13, 1, 9, 16, 1, 1]
);

/// `id-aa-receiptRequest`
pub const AA_RECEIPT_REQUEST: ConstOid = Oid(
    &[42, 134, 72, 134, 247, 13, 1, 9, 16, 2, 1]
);

/// `id-aa-securityLabel`
pub const AA_SECURITY_LABEL: ConstOid = Oid(
    &[42, 134, 72, 134, 247, 13, 1, 9, 16, 2, 2]
);

/// `id-aa-mlExpandHistory`
pub const AA_ML_EXPAND_HISTORY: ConstOid = Oid(
    &[42, 134, 72, 134, 247, 13, 1, 9, 16, 2, 3]
);

/// `id-aa-contentHint`
pub const AA_CONTENT_HINT: ConstOid = Oid(
    &[42, 134, 72, 134, 247, 13, 1, 9, 16, 2, 4]
);

/// `id-aa-msgSigDigest`
pub const AA_MSG_SIG_DIGEST: ConstOid = Oid(
    &[42, 134, 72, 134, 247, 13, 1, 9, 16, 2, 5]
);

/// `id-aa-contentIdentifier`
pub const AA_CONTENT_IDENTIFIER: ConstOid = Oid(
    &[42, 134, 72, 134, 247, 13, 1, 9, 16, 2, 7]
);

/// `id-aa-equivalentLabels`
pub const AA_EQUIVALENT_LABELS: ConstOid = Oid(
    &[42, 134, 72, 134, 247, 13, 1, 9, 16, 2, 9]
);

/// `id-aa-contentReference`
pub const AA_CONTENT_REFERENCE: ConstOid = Oid(
    &[42, 134, 72, 134, 247, 13, 1, 9, 16, 2, 10]
);

/// `id-aa-signingCertificate`
pub const AA_SIGNING_CERTIFICATE: ConstOid = Oid(
    &[42, 134, 72, 134, 247, 13, 1, 9, 16, 2, 12]
);

/// `id-aa-signingCertificateV2`
pub const AA_SIGNING_CERTIFICATE_V2: ConstOid = Oid(
    &[42, 134, 72, 134, 247, 13, 1, 9, 16, 2, 47]
);

/// `id-qt-cps`, the CPS pointer policy qualifier.
pub const QT_CPS: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 2, 1]);

/// `id-qt-unotice`, the user notice policy qualifier.
pub const QT_UNOTICE: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 2, 2]);


//============ Tests =========================================================
