//! Short human-readable description of a decoded PDU, built from the tree
//! after decoding.

use super::{
    error::ErrorCode,
    frame::{
        comm::S7Header,
        param::{ParameterBlock, PlcStop},
        pi::PiService,
    },
    pdu::PduBody,
    szl::SzlData,
    userdata::UserDataPayload,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    /// Dotted path of the field the text describes
    pub path: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub entries: Vec<SummaryEntry>,
}

impl Summary {
    pub(crate) fn build(header: &S7Header, body: &PduBody) -> Self {
        let mut s = Summary::default();
        s.push("header.rosctr", format!("ROSCTR:[{}]", header.rosctr));
        match body {
            PduBody::Params { block, .. } => {
                s.push("params.function", format!("Function:[{}]", block.function()));
                match block {
                    ParameterBlock::PiService(PiService {
                        service: Some(service),
                        ..
                    }) => {
                        s.push("params.service", format!("PI-Service:[{}]", service));
                    }
                    ParameterBlock::PlcStop(PlcStop {
                        name: Some(name), ..
                    }) => {
                        s.push("params.name", format!("Name:[{}]", name));
                    }
                    _ => {}
                }
            }
            PduBody::Userdata(ud) => {
                let h = &ud.header;
                s.push(
                    "userdata.header",
                    format!(
                        "Function:[{}] -> [{}] -> [{}]",
                        h.kind, h.function_group, h.subfunction
                    ),
                );
                let szl = ud.data.as_ref().and_then(|d| match &d.payload {
                    Some(UserDataPayload::Szl(szl)) => Some(szl),
                    _ => None,
                });
                match szl {
                    Some(SzlData::Request(req)) => s.push(
                        "userdata.data.szl",
                        format!("ID:[{:#06x}] Index:[{:#06x}]", req.id.raw, req.index),
                    ),
                    Some(SzlData::Response(resp)) => s.push(
                        "userdata.data.szl",
                        format!("ID:[{:#06x}] Index:[{:#06x}]", resp.id.raw, resp.index),
                    ),
                    Some(SzlData::Continuation(_)) => {
                        s.push("userdata.data.szl", "Continuation".to_string())
                    }
                    _ => {}
                }
                if let Some(code) = h.error_code.filter(|c| *c != ErrorCode::NoError) {
                    s.push("userdata.header.error_code", format!("Error:[{}]", code));
                }
            }
            PduBody::HeaderOnly | PduBody::Undecoded { .. } => {}
        }
        if let Some(err) = header.error.filter(|e| e.error != ErrorCode::NoError) {
            s.push("header.error", format!("Error:[{}]", err.error));
        }
        s
    }

    fn push(&mut self, path: &'static str, text: String) {
        self.entries.push(SummaryEntry { path, text });
    }

    /// All entries on one line, e.g. `ROSCTR:[Job] Function:[Read Var]`
    pub fn info_line(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
