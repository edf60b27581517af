//! Minimal synchronous server wiring every reply variant to a TCP sink.
use std::{
    io::{self, Read, Write},
    net::{TcpListener, TcpStream},
};

use http::{HeaderMap, HeaderValue, Request, StatusCode, request::Parts};
use kotae::{
    Csv, Data, Head, Html, Json, Redirect, Reply, ResponseWriter, SendFile, Text, WebContext,
    template::TemplateSet,
};
use serde_json::json;

fn main() -> io::Result<()> {
    env_logger::init();

    let templates = TemplateSet::new()
        .with_default(|data, out| {
            write!(out, "<!doctype html><h1>tasks: {}</h1>", data["count"])?;
            Ok(())
        })
        .with("task", |data, out| {
            write!(out, "<li>task {}</li>", data["id"])?;
            Ok(())
        });

    let tcp = TcpListener::bind("0.0.0.0:3000")?;
    println!("listening on 0.0.0.0:3000");
    loop {
        let (stream, _addr) = tcp.accept()?;
        if let Err(err) = connection(stream, &templates) {
            eprintln!("connection error: {err}");
        }
    }
}

fn connection(stream: TcpStream, templates: &TemplateSet) -> io::Result<()> {
    let request = read_head(&stream)?;
    let path = request.uri.path().to_owned();
    let mut cx = Context { request, response: StreamWriter::new(&stream) };

    let reply = route(&path, templates);
    if let Err(err) = reply.render(&mut cx) {
        eprintln!("render error: {err}");
    }
    cx.response.finish()
}

fn route<'t>(path: &str, templates: &'t TemplateSet) -> Box<dyn Reply + 't> {
    match path {
        "/" => Box::new(Text::new("hello from kotae")),
        "/created" => Box::new(Head::new(StatusCode::CREATED)),
        "/json" => Box::new(Json::new(json!({ "x": 1 }))),
        "/html" => Box::new(Html::template(templates, json!({ "count": 2 }))),
        "/task" => Box::new(Html::named(templates, "task", json!({ "id": 7 }))),
        "/csv" => Box::new(
            Csv::new(vec![
                vec!["id".into(), "名前".into()],
                vec!["1".into(), "東京".into()],
                vec!["2".into(), "大阪".into()],
            ])
            .attachment(),
        ),
        "/raw" => Box::new(
            Data::new(&b"\x1f\x8b\x08\x00"[..])
                .content_type(HeaderValue::from_static("application/octet-stream")),
        ),
        "/manifest" => Box::new(SendFile::new("Cargo.toml")),
        _ => Box::new(Redirect::new("/")),
    }
}

// ===== Context over a TCP stream =====

struct Context<'s> {
    request: Parts,
    response: StreamWriter<'s>,
}

impl WebContext for Context<'_> {
    fn request(&self) -> &Parts {
        &self.request
    }

    fn response(&mut self) -> &mut dyn ResponseWriter {
        &mut self.response
    }
}

/// Buffers status and headers until the first body write, then streams.
struct StreamWriter<'s> {
    stream: &'s TcpStream,
    headers: HeaderMap,
    status: Option<StatusCode>,
    head_sent: bool,
}

impl<'s> StreamWriter<'s> {
    fn new(stream: &'s TcpStream) -> StreamWriter<'s> {
        StreamWriter { stream, headers: HeaderMap::new(), status: None, head_sent: false }
    }

    fn send_head(&mut self) -> io::Result<()> {
        if self.head_sent {
            return Ok(());
        }
        self.head_sent = true;

        let status = self.status.unwrap_or(StatusCode::OK);
        let mut head = Vec::with_capacity(256);
        write!(
            head,
            "HTTP/1.1 {} {}\r\n",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
        )?;
        for (name, value) in &self.headers {
            head.extend_from_slice(name.as_str().as_bytes());
            head.extend_from_slice(b": ");
            head.extend_from_slice(value.as_bytes());
            head.extend_from_slice(b"\r\n");
        }
        head.extend_from_slice(b"Connection: close\r\n\r\n");
        self.stream.write_all(&head)
    }

    /// Flushes the head even when the render wrote no body.
    fn finish(&mut self) -> io::Result<()> {
        self.send_head()?;
        self.stream.flush()
    }
}

impl io::Write for StreamWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.send_head()?;
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

impl ResponseWriter for StreamWriter<'_> {
    fn headers(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, code: StatusCode) {
        self.status.get_or_insert(code);
    }
}

// ===== Request head =====

fn read_head(mut stream: &TcpStream) -> io::Result<Parts> {
    let mut buf = Vec::with_capacity(1024);
    loop {
        let mut chunk = [0u8; 1024];
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "client closed before the request head",
            ));
        }
        buf.extend_from_slice(&chunk[..n]);

        let mut headers = [httparse::EMPTY_HEADER; 32];
        let mut req = httparse::Request::new(&mut headers);
        match req.parse(&buf) {
            Ok(httparse::Status::Complete(_)) => {
                let mut builder = Request::builder()
                    .method(req.method.unwrap_or("GET"))
                    .uri(req.path.unwrap_or("/"));
                for header in req.headers.iter() {
                    builder = builder.header(header.name, header.value);
                }
                let request = builder
                    .body(())
                    .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
                return Ok(request.into_parts().0);
            }
            Ok(httparse::Status::Partial) => continue,
            Err(err) => return Err(io::Error::new(io::ErrorKind::InvalidData, err)),
        }
    }
}
