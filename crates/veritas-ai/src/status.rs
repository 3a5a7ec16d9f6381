//! Status normalization: raw government status codes and free-text
//! descriptions onto the [`LifecycleStatus`] set, with a progress estimate.
//!
//! Resolution order: numeric code table first, then ordered substring rules
//! over the diacritics-stripped description, then the in-progress default.
//! Total over all inputs; absence of signal is a policy outcome, not an
//! error.

use tracing::warn;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use veritas_core::{LifecycleStatus, StatusResult};

/// Normalize a raw status into a lifecycle stage and progress estimate.
///
/// A code present in the fixed table always wins over the description text.
pub fn normalize_status(raw_description: &str, raw_code: Option<u32>) -> StatusResult {
    let status = resolve_status(raw_description, raw_code);
    StatusResult {
        status,
        progress_percent: progress_for(status),
    }
}

/// Fixed status → progress table. Terminal stages are done, a floor vote is
/// most of the way there, committee review is mid-pipeline. The in-progress
/// default is 20, not zero: actively tracked items are rarely untouched.
pub fn progress_for(status: LifecycleStatus) -> u8 {
    match status {
        s if s.is_terminal() => 100,
        LifecycleStatus::UnderVote => 75,
        LifecycleStatus::UnderReview => 40,
        _ => 20,
    }
}

fn resolve_status(raw_description: &str, raw_code: Option<u32>) -> LifecycleStatus {
    if let Some(code) = raw_code
        && let Some(status) = code_status(code)
    {
        return status;
    }

    let description = fold(raw_description);
    for (needles, status) in TEXT_RULES {
        if needles.iter().any(|needle| description.contains(needle)) {
            return *status;
        }
        if *status == LifecycleStatus::Approved && approval_into_norma(&description) {
            return *status;
        }
    }

    // Diagnostic signal so the code table can be extended later.
    if let Some(code) = raw_code {
        warn!(code, description = raw_description, "unmapped status code, defaulting to in-progress");
    }
    LifecycleStatus::InProgress
}

/// Ordered substring rules over the folded description. Earlier rules win;
/// the order resolves overlaps (e.g. "aguardando parecer" is a floor-agenda
/// signal and must match before the committee "parecer" rule).
const TEXT_RULES: &[(&[&str], LifecycleStatus)] = &[
    (&["arquivad"], LifecycleStatus::Archived),
    (
        &["sancionad", "promulgad", "transformad", "convertid"],
        LifecycleStatus::Approved,
    ),
    (&["vetad"], LifecycleStatus::Vetoed),
    (&["retirad", "devolvid"], LifecycleStatus::Withdrawn),
    (
        &["pronta para pauta", "aguardando delibera", "em vota", "plenar", "aguardando parecer"],
        LifecycleStatus::UnderVote,
    ),
    (
        &["analise", "comiss", "parecer", "apreciac"],
        LifecycleStatus::UnderReview,
    ),
];

/// "aprovad" alone is ambiguous: a committee approval is still under
/// review. It only signals final approval when "norma" follows it.
fn approval_into_norma(description: &str) -> bool {
    description
        .find("aprovad")
        .is_some_and(|pos| description[pos..].contains("norma"))
}

/// Câmara situation codes observed in the wild. Codes absent here fall
/// through to the text rules. The many "aguardando" codes land in the
/// in-progress catch-all bucket on purpose.
fn code_status(code: u32) -> Option<LifecycleStatus> {
    use LifecycleStatus::*;
    let status = match code {
        900 | 901 | 902 | 905 | 906 | 907 | 910 | 911 | 912 | 914 | 917 | 918 | 921 | 922
        | 925 | 926 | 927 | 929 | 932 | 933 | 934 | 935 | 936 | 1000 | 1010 | 1020 | 1030
        | 1040 | 1050 | 1052 | 1060 | 1070 | 1080 | 1110 | 1120 | 1150 | 1160 | 1161 | 1170
        | 1180 | 1185 | 1200 | 1201 | 1210 | 1220 | 1221 | 1223 | 1230 | 1260 | 1270 | 1285
        | 1290 | 1291 | 1293 | 1294 | 1296 | 1298 | 1299 | 1301 | 1302 | 1303 | 1304 | 1305
        | 1311 | 1312 | 1314 | 1350 | 1360 | 1381 => InProgress,
        903 | 904 | 920 | 924 | 939 | 1222 => UnderVote,
        915 | 928 | 1090 | 1295 | 1297 | 1300 | 1310 | 1313 | 1355 | 1380 => UnderReview,
        923 | 930 | 931 | 940 | 941 | 1250 | 1292 => Archived,
        937 => Vetoed,
        950 => Withdrawn,
        1140 => Approved,
        _ => return None,
    };
    Some(status)
}

/// Lowercase and strip diacritics (NFD, drop combining marks) so rules match
/// "análise", "Análise" and "analise" alike.
fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
