// Copyright (C) 2026 The univmax Authors
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.
use std::net::{Ipv4Addr, Ipv6Addr};

use chrono::NaiveDateTime;
use regex::Regex;

use super::error::*;

const DIRECTOR_SEARCH_PATTERN: &str = r"\w{2}-\w{2}";
const PORT_SEARCH_PATTERN: &str = r"\w{1,2}";
const WWN_SEARCH_PATTERN_16: &str = r"[0-9a-fA-F]{16}";
const ISCSI_IQN_SEARCH_PATTERN: &str =
    r"^iqn.\d{4}-\d{2}.(?:com|org).\w{1,}:(?:\d{2}:)*[0-9a-fA-F]{1,32}$";
const TIME_STRING_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Check if a given string is a valid IPv4 address.
pub fn check_ipv4(ipv4: &str) -> bool {
    ipv4.parse::<Ipv4Addr>().is_ok()
}

/// Check if a given string is a valid IPv6 address.
pub fn check_ipv6(ipv6: &str) -> bool {
    ipv6.parse::<Ipv6Addr>().is_ok()
}

/// Convert a camel case string like `storageGroupId` to snake case
/// `storage_group_id`.
///
/// Acronyms are kept together, `FEDirector` becomes `fe_director`.
pub fn convert_to_snake_case(camel_case_string: &str) -> Result<String> {
    let re_word = Regex::new(r"(.)([A-Z][a-z]+)")?;
    let re_tail = Regex::new(r"([a-z0-9])([A-Z])")?;
    let s1 = re_word.replace_all(camel_case_string, "${1}_${2}");
    let s2 = re_tail.replace_all(&s1, "${1}_${2}").to_lowercase();
    Ok(s2.replace("__", "_"))
}

/// Check that the string is an epoch timestamp in seconds, e.g.
/// `1606820929`.
pub fn check_epoch_timestamp(epoch: &str) -> Result<bool> {
    let regex_epoch = Regex::new(r"^\d{10}$")?;
    Ok(regex_epoch.is_match(epoch))
}

/// Check that the string is a time string in `YYYY-MM-DD HH:MM` format,
/// e.g. `2020-12-01 15:00`.
pub fn check_timestamp(time_string: &str) -> bool {
    NaiveDateTime::parse_from_str(time_string, TIME_STRING_FORMAT).is_ok()
}

/// Check if the string looks like a 16 digit hex FC WWN.
pub fn is_valid_wwn(wwn: &str) -> Result<bool> {
    let regex_wwn = Regex::new(&format!("^{}$", WWN_SEARCH_PATTERN_16))?;
    Ok(regex_wwn.is_match(wwn))
}

/// Check if the string looks like an iSCSI IQN.
pub fn is_valid_iqn(iqn: &str) -> Result<bool> {
    let regex_iqn = Regex::new(ISCSI_IQN_SEARCH_PATTERN)?;
    Ok(regex_iqn.is_match(iqn))
}

/// Verify an array side initiator id.
///
/// Valid forms are `FA-1D:4:10000090fa66060a` for FC and
/// `SE-4E:000:iqn.1992-04.com.emc:60:0000000000000001` for iSCSI.
///
/// # Errors
///
///  * [`U4vError::InvalidInput`][1]
///
/// [1]: enum.U4vError.html#variant.InvalidInput
pub fn verify_initiator_id(init_id: &str) -> Result<()> {
    let non_iscsi = format!(
        "{}:{}:{}",
        DIRECTOR_SEARCH_PATTERN, PORT_SEARCH_PATTERN, WWN_SEARCH_PATTERN_16
    );
    let iscsi = format!(
        concat!(
            r"{}:\d{{3}}:iqn.\d{{4}}-\d{{2}}.(?:com|org).\w{{1,}}:",
            r"\d{{2}}:[0-9a-fA-F]{{1,32}}"
        ),
        DIRECTOR_SEARCH_PATTERN
    );
    let regex_init = Regex::new(&format!("^(?:{}|{})$", non_iscsi, iscsi))?;
    if regex_init.is_match(init_id) {
        Ok(())
    } else {
        Err(U4vError::InvalidInput(format!(
            "Invalid initiator ID string '{}'",
            init_id
        )))
    }
}

/// Check if the string is a front end director id like `FA-1D`.
pub(crate) fn is_director_id(director: &str) -> Result<bool> {
    let regex_dir = Regex::new(&format!("^{}", DIRECTOR_SEARCH_PATTERN))?;
    Ok(regex_dir.is_match(director))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case() {
        let cases = [
            ("storageGroupId", "storage_group_id"),
            ("FEDirector", "fe_director"),
            ("Array", "array"),
            ("ISCSITarget", "iscsi_target"),
            ("StorageGroupByPool", "storage_group_by_pool"),
            ("already_snake", "already_snake"),
        ];
        for (camel, snake) in &cases {
            assert_eq!(convert_to_snake_case(camel).unwrap(), *snake);
        }
    }

    #[test]
    fn ip_checks() {
        assert!(check_ipv4("10.60.141.63"));
        assert!(!check_ipv4("10.60.141"));
        assert!(check_ipv6("2001:db8::ff00:42:8329"));
        assert!(!check_ipv6("10.60.141.63"));
    }

    #[test]
    fn time_checks() {
        assert!(check_epoch_timestamp("1606820929").unwrap());
        assert!(!check_epoch_timestamp("1606820929000").unwrap());
        assert!(check_timestamp("2020-12-01 15:00"));
        assert!(!check_timestamp("2020-12-01T15:00"));
        assert!(!check_timestamp("01-12-2020 15:00"));
    }

    #[test]
    fn initiator_ids() {
        verify_initiator_id("FA-1D:4:10000090fa66060a").unwrap();
        verify_initiator_id(
            "SE-4E:000:iqn.1992-04.com.emc:60:0000000000000001",
        )
        .unwrap();
        assert!(verify_initiator_id("10000090fa66060a").is_err());
        assert!(is_valid_wwn("10000090fa66060a").unwrap());
        assert!(!is_valid_wwn("10000090fa66060").unwrap());
        assert!(is_valid_iqn(
            "iqn.1992-04.com.emc:600009700bcbb70e3287017400000001"
        )
        .unwrap());
    }
}
