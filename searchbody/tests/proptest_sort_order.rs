//! Property tests for direction parsing.

use proptest::prelude::*;
use searchbody::{Error, SortOrder};

fn mixed_case(word: &str, mask: u8) -> String {
    word.chars()
        .enumerate()
        .map(|(i, c)| {
            if mask & (1 << (i % 8)) != 0 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn any_casing_of_asc_parses(mask in any::<u8>()) {
        let input = mixed_case("asc", mask);
        prop_assert_eq!(input.parse::<SortOrder>().unwrap(), SortOrder::Asc);
    }

    #[test]
    fn any_casing_of_desc_parses(mask in any::<u8>()) {
        let input = mixed_case("desc", mask);
        prop_assert_eq!(input.parse::<SortOrder>().unwrap(), SortOrder::Desc);
    }

    #[test]
    fn anything_else_is_rejected(input in "\\PC*") {
        prop_assume!(!input.eq_ignore_ascii_case("asc"));
        prop_assume!(!input.eq_ignore_ascii_case("desc"));
        let err = input.parse::<SortOrder>().unwrap_err();
        prop_assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn parsed_directions_serialize_lowercase(mask in any::<u8>()) {
        let order = mixed_case("desc", mask).parse::<SortOrder>().unwrap();
        prop_assert_eq!(order.to_string(), "desc");
    }
}
