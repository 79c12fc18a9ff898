/// Hand-built `multipart/form-data` bodies for proposal uploads.
pub struct FormBody {
    boundary: String,
    buf: Vec<u8>,
}

#[allow(dead_code)]
impl FormBody {
    pub fn new() -> Self {
        FormBody {
            boundary: "----tawreed-test-boundary".to_string(),
            buf: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                self.boundary, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// File part whose name travels only as an RFC 5987 `filename*`.
    pub fn file_utf8(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        let encoded: String = file_name
            .bytes()
            .map(|b| match b {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'-' | b'_' => (b as char).to_string(),
                _ => format!("%{:02X}", b),
            })
            .collect();
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename*=UTF-8''{}\r\nContent-Type: {}\r\n\r\n",
                self.boundary, name, encoded, content_type
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// `(content-type header, body)`
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.buf,
        )
    }
}
