//! Cluster teardown: deletes the experiment namespace through `kubectl`.

use crate::exec::Channel;
use crate::response::Response;
use crate::revoke::registry::Teardown;
use crate::store::PreparationRecord;

pub struct KubernetesTeardown {
    channel: Box<dyn Channel>,
    kubectl: String,
    namespace: String,
}

impl KubernetesTeardown {
    pub fn new(
        channel: Box<dyn Channel>,
        kubectl: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            channel,
            kubectl: kubectl.into(),
            namespace: namespace.into(),
        }
    }
}

impl Teardown for KubernetesTeardown {
    fn detach(&self, _record: &PreparationRecord) -> Response {
        let args = format!("delete ns {}", self.namespace);
        self.channel.run(&self.kubectl, &args)
    }
}
