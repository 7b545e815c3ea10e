use crate::ports::{DnsResolver, Network};
use crate::services::{parse_peer_addresses, AnswerSynthesizer, QueryClassifier, ZoneTable};
use meshdns_domain::{DnsQuery, DnsRequest, DnsResponse, ZoneClassification};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Answers one question: classify, pick the zone handler, resolve, synthesize.
pub struct HandleDnsQueryUseCase {
    classifier: QueryClassifier,
    private_resolver: Arc<dyn DnsResolver>,
    public_resolver: Arc<dyn DnsResolver>,
    network: Arc<dyn Network>,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        classifier: QueryClassifier,
        private_resolver: Arc<dyn DnsResolver>,
        public_resolver: Arc<dyn DnsResolver>,
        network: Arc<dyn Network>,
    ) -> Self {
        Self {
            classifier,
            private_resolver,
            public_resolver,
            network,
        }
    }

    pub fn classifier(&self) -> &QueryClassifier {
        &self.classifier
    }

    pub async fn execute(&self, query: &DnsQuery) -> DnsResponse {
        match self.classifier.classify(&query.domain) {
            ZoneClassification::Authoritative => self.answer_authoritative(query).await,
            classification => self.answer_recursive(query, classification).await,
        }
    }

    async fn answer_authoritative(&self, query: &DnsQuery) -> DnsResponse {
        let zone = self.classifier.zones().own_domain();
        info!(zone = %zone, id = query.id, "Resolving DNS question");
        debug!(
            zone = %zone,
            name = %query.domain,
            qtype = %query.record_type,
            "Received DNS question"
        );

        let lookup = self
            .network
            .lookup_host(&query.domain)
            .await
            .map(|entries| parse_peer_addresses(&entries));

        AnswerSynthesizer::authoritative().synthesize(query, lookup)
    }

    async fn answer_recursive(
        &self,
        query: &DnsQuery,
        classification: ZoneClassification,
    ) -> DnsResponse {
        let synthesizer = AnswerSynthesizer::recursive();

        if !query.recursion_desired {
            warn!(zone = ZoneTable::ROOT, id = query.id, "Non-recursive query");
            return synthesizer.refuse(query);
        }

        info!(zone = ZoneTable::ROOT, id = query.id, "Recursively resolving DNS query");
        debug!(
            zone = ZoneTable::ROOT,
            name = %query.domain,
            qtype = %query.record_type,
            class = %classification,
            "Received DNS question"
        );

        let resolver = match classification {
            ZoneClassification::RecursivePublic => &self.public_resolver,
            _ => &self.private_resolver,
        };

        let lookup = resolver
            .resolve(&DnsRequest::from_query(query))
            .await
            .map(|resolution| {
                debug!(
                    name = %query.domain,
                    upstream = resolution.upstream_server.as_deref().unwrap_or("-"),
                    addresses = resolution.addresses.len(),
                    "Resolved recursively"
                );
                resolution.addresses.to_vec()
            });

        synthesizer.synthesize(query, lookup)
    }
}
