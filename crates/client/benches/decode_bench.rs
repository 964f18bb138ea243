use std::time::Duration;

use bytes::Bytes;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use micro_client::protocol::{Headers, RequestFactory, ResponseFactory, TransportError, Verb};
use micro_client::transport::{Transport, TransportHandle, TransportOptions};

// Session double: response assembly never touches the network
struct NoopTransport;

impl Transport for NoopTransport {
    fn execute(&mut self, _options: &TransportOptions) -> Result<Bytes, TransportError> {
        Ok(Bytes::new())
    }

    fn elapsed(&self) -> Duration {
        Duration::ZERO
    }
}

fn bench_build_response(c: &mut Criterion) {
    let raw = Bytes::from_static(
        b"HTTP/1.1 100 Continue\r\n\r\n\
          HTTP/1.1 200 OK\r\n\
          Content-Type: text/plain\r\n\
          Content-Length: 17\r\n\
          Cache-Control: no-store\r\n\
          \r\n\
          Just some content",
    );
    let handle = TransportHandle::new(Box::new(NoopTransport));
    let request = RequestFactory.build(Verb::Get, "http://localhost:8080/bench", Headers::new()).unwrap();

    c.bench_function("build_response_with_informational_block", |b| {
        b.iter(|| {
            let response = ResponseFactory.build(raw.clone(), &handle, request.clone()).unwrap();
            black_box(response);
        });
    });
}

criterion_group!(benches, bench_build_response);
criterion_main!(benches);
