mod common;

use common::{
    dbread_item, drive_es_item, nck_item, octet_value, pbc_rid_item, s7any_item, tia1200_item,
    unknown_syntax_item,
};
use proptest::prelude::*;
use s7dissect_core::protocol::{
    frame::{
        bcd_year, decode_data_values, decode_item, item::decode_items, DataTransportSize,
        S7Header,
    },
    Cursor,
};

fn item_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        any::<u16>().prop_map(|b| s7any_item(b & 0x1FFF)),
        prop::collection::vec((any::<u8>(), any::<u16>(), any::<u16>()), 1..6)
            .prop_map(|areas| dbread_item(&areas)),
        any::<u8>().prop_map(nck_item),
        (1usize..8).prop_map(tia1200_item),
        Just(drive_es_item()),
        any::<u32>().prop_map(pbc_rid_item),
        (
            prop::sample::select(vec![0x01u8, 0x20, 0x55, 0x90, 0xC0]),
            prop::collection::vec(any::<u8>(), 0..24),
        )
            .prop_map(|(syntax_id, body)| unknown_syntax_item(syntax_id, &body)),
    ]
}

proptest! {
    #[test]
    fn test_item_advances_by_spec_length(item in item_strategy(), lead in 0usize..4) {
        let mut buf = vec![0xEE; lead];
        buf.extend_from_slice(&item);
        buf.push(0xEE);
        let (decoded, next) = decode_item(&buf, lead).unwrap();
        prop_assert_eq!(next, lead + decoded.spec_length as usize + 2);
        prop_assert_eq!(next, lead + item.len());
    }

    #[test]
    fn test_mixed_item_list_alignment(items in prop::collection::vec(item_strategy(), 1..=8)) {
        let buf: Vec<u8> = items.concat();
        let mut cur = Cursor::new(&buf);
        let decoded = decode_items(&mut cur, items.len(), false);
        prop_assert_eq!(decoded.len(), items.len());
        prop_assert!(decoded.iter().all(|i| i.is_ok()));
        prop_assert_eq!(cur.offset(), buf.len());
    }

    #[test]
    fn test_fill_byte_law(lens in prop::array::uniform3(0usize..7)) {
        let mut buf = Vec::new();
        let mut expected_fills = 0;
        for (i, &len) in lens.iter().enumerate() {
            buf.extend(octet_value(&vec![0xA5; len]));
            if len % 2 == 1 && i + 1 < lens.len() {
                buf.push(0x00);
                expected_fills += 1;
            }
        }
        let (values, next) = decode_data_values(&buf, 0, lens.len());
        prop_assert_eq!(next, buf.len());
        prop_assert_eq!(
            next,
            lens.iter().map(|l| 4 + l).sum::<usize>() + expected_fills
        );
        for (i, v) in values.iter().enumerate() {
            let v = v.as_ref().unwrap();
            prop_assert_eq!(v.payload_len(), lens[i]);
            prop_assert_eq!(v.fill_byte, lens[i] % 2 == 1 && i + 1 < lens.len());
        }
    }

    #[test]
    fn test_bit_lengths_round_up_to_bytes(length in 0u16..=u16::MAX) {
        for ts in [
            DataTransportSize::Bit,
            DataTransportSize::ByteWordDword,
            DataTransportSize::Integer,
        ] {
            prop_assert_eq!(ts.payload_len(length), (length as usize + 7) / 8);
        }
        for ts in [
            DataTransportSize::Null,
            DataTransportSize::DInteger,
            DataTransportSize::Real,
            DataTransportSize::OctetString,
        ] {
            prop_assert_eq!(ts.payload_len(length), length as usize);
        }
    }

    #[test]
    fn test_header_length_follows_rosctr(pdu_ref in any::<u16>(), class in any::<u8>(), code in any::<u8>()) {
        let r = pdu_ref.to_be_bytes();
        let job = [0x32, 0x01, 0x00, 0x00, r[0], r[1], 0x00, 0x00, 0x00, 0x00];
        let h = S7Header::parse(&job).unwrap();
        prop_assert_eq!(h.header_len(), 10);
        prop_assert!(h.error.is_none());

        let ack = [0x32, 0x03, 0x00, 0x00, r[0], r[1], 0x00, 0x00, 0x00, 0x00, class, code];
        let h = S7Header::parse(&ack).unwrap();
        prop_assert_eq!(h.header_len(), 12);
        let err = h.error.unwrap();
        prop_assert_eq!(err.class.code(), class);
        prop_assert_eq!(err.code, code);
        prop_assert_eq!(h.pdu_ref, pdu_ref);
    }
}

#[test]
fn test_bcd_century_boundaries() {
    assert_eq!(bcd_year(0x14), 2014);
    assert_eq!(bcd_year(0x95), 1995);
    assert_eq!(bcd_year(0x88), 2088);
    assert_eq!(bcd_year(0x89), 1989);
    assert_eq!(bcd_year(0x00), 2000);
}
