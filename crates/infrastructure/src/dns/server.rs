use crate::dns::forwarding::RecordTypeMapper;
use hickory_proto::op::{Header, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{RData, Record};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use meshdns_application::use_cases::HandleDnsQueryUseCase;
use meshdns_domain::{DnsQuery, DnsResponse, ResponseStatus};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, info_span, Instrument};

/// Bridges hickory's request loop to the query use case. Cheap to clone;
/// the UDP and TCP servers each hold one.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let span = info_span!(
            "dns_request",
            remote_addr = %request.src(),
            id = request.header().id()
        );

        async move {
            let request_info = match request.request_info() {
                Ok(info) => info,
                Err(e) => {
                    error!(error = %e, "Failed to parse request info");
                    return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                        .await;
                }
            };

            let question = request_info.query.original();
            let query = DnsQuery::new(
                question.name().to_ascii(),
                RecordTypeMapper::from_hickory(question.query_type()),
            )
            .with_id(request.header().id())
            .with_recursion_desired(request.header().recursion_desired());

            let response = self.use_case.execute(&query).await;

            let answers: Vec<Record> = response
                .answers
                .iter()
                .map(|record| {
                    let rdata = match record.address {
                        IpAddr::V4(v4) => RData::A(A(v4)),
                        IpAddr::V6(v6) => RData::AAAA(AAAA(v6)),
                    };
                    Record::from_rdata(question.name().clone(), record.ttl, rdata)
                })
                .collect();

            let header = response_header(request, &response);
            debug!(
                rcode = %response.status,
                answers = answers.len(),
                "Sending response"
            );

            let builder = MessageResponseBuilder::from_message_request(request);
            let message = builder.build(header, answers.iter(), &[], &[], &[]);

            match response_handle.send_response(message).await {
                Ok(info) => info,
                Err(e) => {
                    error!(error = %e, "Failed to write DNS response");
                    ResponseInfo::from(header)
                }
            }
        }
        .instrument(span)
        .await
    }
}

fn response_header(request: &Request, response: &DnsResponse) -> Header {
    let mut header = Header::response_from_request(request.header());
    header.set_authoritative(response.authoritative);
    header.set_recursion_available(response.recursion_available);
    header.set_response_code(to_response_code(response.status));
    header
}

pub fn to_response_code(status: ResponseStatus) -> ResponseCode {
    match status {
        ResponseStatus::NoError => ResponseCode::NoError,
        ResponseStatus::NameError => ResponseCode::NXDomain,
        ResponseStatus::ServerFailure => ResponseCode::ServFail,
        ResponseStatus::NotImplemented => ResponseCode::NotImp,
        ResponseStatus::Refused => ResponseCode::Refused,
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_response_code(code);
    header.set_recursion_available(true);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(header)
        }
    }
}
