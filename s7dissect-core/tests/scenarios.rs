mod common;

use common::{
    ack_data, init_tracing, job, octet_value, s7any_item, userdata, userdata_param,
    userdata_response_param,
};
use s7dissect_core::{
    decode,
    protocol::{
        frame::{DataTransportSize, ParameterBlock, ReturnCode, Rosctr, VarPayload},
        szl::{SzlData, SzlRecord},
        userdata::{FunctionGroup, UserDataPayload, UserDataType},
        PduBody,
    },
    DecodeError, DecoderConfig, S7Decoder,
};

fn szl_payload(body: &PduBody) -> &SzlData {
    let PduBody::Userdata(ud) = body else {
        panic!("expected userdata body")
    };
    match ud.data.as_ref().and_then(|d| d.payload.as_ref()) {
        Some(UserDataPayload::Szl(szl)) => szl,
        other => panic!("expected SZL payload, got {other:?}"),
    }
}

#[test]
fn test_read_var_job_without_items() {
    init_tracing();
    let pdu = decode(&job(&[0x04, 0x01], &[])).unwrap();
    assert_eq!(pdu.header.rosctr, Rosctr::Job);
    assert_eq!(pdu.header.pdu_ref, 1);
    assert_eq!(pdu.header.param_len, 2);
    let PduBody::Params {
        block: ParameterBlock::ReadVar(va),
        ..
    } = pdu.body
    else {
        panic!("expected ReadVar")
    };
    assert_eq!(va.item_count, 1);
    assert_eq!(va.items.len(), 1);
    match &va.items[0] {
        Err(DecodeError::Truncated { offset, .. }) => assert_eq!(*offset, 12),
        other => panic!("expected truncated item, got {other:?}"),
    }
}

#[test]
fn test_setup_communication_request() {
    init_tracing();
    let pdu = decode(&job(&[0xF0, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0xF0], &[])).unwrap();
    let PduBody::Params {
        block: ParameterBlock::SetupCommunication(setup),
        param_rest,
        ..
    } = pdu.body
    else {
        panic!("expected SetupCommunication")
    };
    assert_eq!(setup.reserved, Some(0));
    assert_eq!(setup.max_amq_calling, Some(1));
    assert_eq!(setup.max_amq_called, Some(1));
    assert_eq!(setup.pdu_length, Some(240));
    assert_eq!(setup.rest, None);
    assert_eq!(param_rest, None);
    assert_eq!(
        pdu.summary.info_line(),
        "ROSCTR:[Job] Function:[Setup communication]"
    );
}

#[test]
fn test_read_var_response_single_value() {
    init_tracing();
    let pdu = decode(&ack_data(&[0x04, 0x01], &[0xFF, 0x04, 0x00, 0x10, 0xAB, 0xCD])).unwrap();
    assert_eq!(pdu.header.header_len(), 12);
    let PduBody::Params {
        block: ParameterBlock::ReadVar(va),
        data_rest,
        ..
    } = pdu.body
    else {
        panic!("expected ReadVar")
    };
    let VarPayload::Values(values) = va.payload else {
        panic!("expected values")
    };
    assert_eq!(values.len(), 1);
    let v = values[0].as_ref().unwrap();
    assert_eq!(v.return_code, ReturnCode::Ok);
    assert_eq!(v.transport_size, Some(DataTransportSize::ByteWordDword));
    assert_eq!(v.length, 16);
    assert_eq!(v.payload_len(), 2);
    assert!(!v.fill_byte);
    assert_eq!(data_rest, None);
}

#[test]
fn test_szl_request_general_communication_data() {
    init_tracing();
    let pdu = decode(&userdata(
        &userdata_param(0x44, 0x01),
        &[0x00, 0x00, 0x00, 0x1C, 0x01, 0x31, 0x00, 0x01],
    ))
    .unwrap();
    let PduBody::Userdata(ref ud) = pdu.body else {
        panic!("expected userdata")
    };
    assert_eq!(ud.header.kind, UserDataType::Request);
    assert_eq!(ud.header.function_group, FunctionGroup::Cpu);
    let data = ud.data.as_ref().unwrap();
    assert_eq!(data.head.length, 0x1C);
    let SzlData::Request(req) = szl_payload(&pdu.body) else {
        panic!("expected SZL request")
    };
    assert_eq!(req.id.raw, 0x0131);
    assert_eq!(req.index, 0x0001);
    assert_eq!(req.index_name, Some("General communication data"));
}

#[test]
fn test_szl_request_with_short_length_field() {
    init_tracing();
    let pdu = decode(&userdata(
        &userdata_param(0x44, 0x01),
        &[0xFF, 0x09, 0x00, 0x02, 0x01, 0x31, 0x00, 0x01],
    ))
    .unwrap();
    let PduBody::Userdata(ref ud) = pdu.body else {
        panic!("expected userdata")
    };
    assert_eq!(ud.data_rest, None);
    let data = ud.data.as_ref().unwrap();
    assert_eq!(data.head.length, 2);
    assert_eq!(data.rest, None);
    let SzlData::Request(req) = szl_payload(&pdu.body) else {
        panic!("expected SZL request")
    };
    assert_eq!(req.id.raw, 0x0131);
    assert_eq!(req.index, 0x0001);
}

#[test]
fn test_szl_response_clamped_across_pdus() {
    init_tracing();
    let mut body = vec![0xFF, 0x09, 0x00, 0x28];
    body.extend_from_slice(&[0x00, 0x37, 0x00, 0x00, 0x00, 0x0C, 0x00, 0x0A]);
    body.extend(std::iter::repeat(0x5A).take(32));
    let pdu = decode(&userdata(&userdata_response_param(0x84, 0x01, 0x00, 0x00), &body)).unwrap();
    let SzlData::Response(resp) = szl_payload(&pdu.body) else {
        panic!("expected SZL response")
    };
    assert_eq!(resp.records.len(), 2);
    let rest = resp.rest.as_ref().unwrap();
    assert_eq!(rest.bytes.len(), 8);
    assert_eq!(rest.offset, 22 + 4 + 32);
    assert_eq!(pdu.trailing, None);
}

#[test]
fn test_szl_continuation_fragment() {
    init_tracing();
    let body = [0xFF, 0x09, 0x00, 0x04, 0x01, 0x02, 0x03, 0x04];
    let pdu = decode(&userdata(&userdata_response_param(0x84, 0x01, 0x07, 0x01), &body)).unwrap();
    assert!(matches!(szl_payload(&pdu.body), SzlData::Continuation(raw) if raw.len() == 4));
}

#[test]
fn test_szl_module_identification_response() {
    init_tracing();
    let mut record = vec![0x00, 0x01];
    record.extend_from_slice(b"6ES7 315-2EH14-0AB0 ");
    record.extend_from_slice(&[0x00, 0xC0, 0x00, 0x03, 0x00, 0x01]);
    let mut szl = vec![0x00, 0x11, 0x00, 0x01, 0x00, 0x1C, 0x00, 0x01];
    szl.extend_from_slice(&record);
    let mut body = vec![0xFF, 0x09];
    body.extend_from_slice(&(szl.len() as u16).to_be_bytes());
    body.extend_from_slice(&szl);

    let param = userdata_response_param(0x84, 0x01, 0x00, 0x00);
    let pdu = decode(&userdata(&param, &body)).unwrap();
    let SzlData::Response(resp) = szl_payload(&pdu.body) else {
        panic!("expected SZL response")
    };
    let entry = resp.records[0].as_ref().unwrap();
    let SzlRecord::ModuleIdentification(m) = &entry.record else {
        panic!("expected module identification")
    };
    assert_eq!(m.order_number, "6ES7 315-2EH14-0AB0");
    assert_eq!(resp.rest, None);

    let raw = S7Decoder::new(DecoderConfig::new().with_szl_records(false))
        .decode(&userdata(&param, &body))
        .unwrap();
    let SzlData::Response(resp) = szl_payload(&raw.body) else {
        panic!("expected SZL response")
    };
    assert!(matches!(
        resp.records[0].as_ref().unwrap().record,
        SzlRecord::Raw(ref r) if r.len() == 28
    ));
}

#[test]
fn test_write_var_job_values_follow_items() {
    init_tracing();
    let mut param = vec![0x05, 0x02];
    param.extend(s7any_item(0));
    param.extend(s7any_item(4));
    let mut data = octet_value(&[0x11]);
    data.push(0x00);
    data.extend(octet_value(&[0x22, 0x33]));
    let pdu = decode(&job(&param, &data)).unwrap();
    let PduBody::Params {
        block: ParameterBlock::WriteVar(va),
        data_rest,
        ..
    } = pdu.body
    else {
        panic!("expected WriteVar")
    };
    assert_eq!(va.items.len(), 2);
    let VarPayload::Values(values) = va.payload else {
        panic!("expected values")
    };
    assert!(values[0].as_ref().unwrap().fill_byte);
    assert_eq!(values[1].as_ref().unwrap().data.as_slice(), &[0x22, 0x33]);
    assert_eq!(data_rest, None);
}

#[test]
fn test_foreign_buffer_is_rejected() {
    init_tracing();
    assert_eq!(
        decode(&[0x03, 0x00, 0x00, 0x1F, 0x02, 0xF0, 0x80, 0x32, 0x01, 0x00]),
        Err(DecodeError::NotThisProtocol)
    );
}

#[test]
fn test_decoded_tree_serializes() {
    init_tracing();
    let pdu = decode(&userdata(
        &userdata_param(0x44, 0x01),
        &[0xFF, 0x09, 0x00, 0x04, 0x01, 0x31, 0x00, 0x01],
    ))
    .unwrap();
    let json = serde_json::to_value(&pdu).unwrap();
    assert_eq!(json["header"]["rosctr"], "Userdata");
    assert_eq!(json["body"]["userdata"]["header"]["type"], "Request");
    assert_eq!(
        json["body"]["userdata"]["data"]["payload"]["szl"]["request"]["index_name"],
        "General communication data"
    );
}
