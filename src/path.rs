pub mod encryption;
pub mod options;

pub use options::{Gravity, ResizeType, SourceUrl};

use std::fmt;

/// Builds the unsigned path for one image request.
///
/// Two layouts are supported:
/// - [`ImagePath::modern`]: `/rs:{type}:{w}:{h}[:{enlarge}[:{extend}]]/g:{gravity}/dpr:{n}/{source}`
/// - [`ImagePath::legacy`]: `/{type}/{w}/{h}/{gravity}/{enlarge}/{source}`
///
/// A width or height of 0 lets the proxy derive that dimension. Output
/// always begins with `/` and can be passed straight to the signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePath {
    source: SourceUrl,
    resize: ResizeType,
    width: u32,
    height: u32,
    enlarge: Option<bool>,
    extend: Option<bool>,
    gravity: Option<Gravity>,
    dpr: Option<u8>,
}

fn flag(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

impl ImagePath {
    pub fn new(source: SourceUrl) -> Self {
        Self {
            source,
            resize: ResizeType::Fit,
            width: 0,
            height: 0,
            enlarge: None,
            extend: None,
            gravity: None,
            dpr: None,
        }
    }

    pub fn resize(mut self, resize: ResizeType, width: u32, height: u32) -> Self {
        self.resize = resize;
        self.width = width;
        self.height = height;
        self
    }

    pub fn enlarge(mut self, enlarge: bool) -> Self {
        self.enlarge = Some(enlarge);
        self
    }

    pub fn extend(mut self, extend: bool) -> Self {
        self.extend = Some(extend);
        self
    }

    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn dpr(mut self, dpr: u8) -> Self {
        self.dpr = Some(dpr);
        self
    }

    pub fn source(&self) -> &SourceUrl {
        &self.source
    }

    /// Option-style path. Optional segments are omitted when unset; setting
    /// `extend` alone forces an explicit `enlarge` of 0 before it.
    pub fn modern(&self) -> String {
        let mut out = format!("/rs:{}:{}:{}", self.resize, self.width, self.height);
        match (self.enlarge, self.extend) {
            (None, None) => {}
            (Some(enlarge), None) => {
                out.push(':');
                out.push_str(flag(enlarge));
            }
            (enlarge, Some(extend)) => {
                out.push(':');
                out.push_str(flag(enlarge.unwrap_or(false)));
                out.push(':');
                out.push_str(flag(extend));
            }
        }
        if let Some(gravity) = self.gravity {
            out.push_str("/g:");
            out.push_str(gravity.as_str());
        }
        if let Some(dpr) = self.dpr {
            out.push_str(&format!("/dpr:{}", dpr));
        }
        out.push('/');
        out.push_str(&self.source.to_string());
        out
    }

    /// Positional path; gravity defaults to center and enlarge to 0.
    /// `extend` and `dpr` have no slot in this layout and are ignored.
    pub fn legacy(&self) -> String {
        format!(
            "/{}/{}/{}/{}/{}/{}",
            self.resize,
            self.width,
            self.height,
            self.gravity.unwrap_or(Gravity::Center),
            flag(self.enlarge.unwrap_or(false)),
            self.source
        )
    }
}

impl fmt::Display for ImagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.modern())
    }
}
