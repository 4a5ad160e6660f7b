//! GPU context wrapper.
//!
//! `GpuContext` owns the `glow::Context` handed over by the host and
//! records the driver version string once at startup for diagnostics.

pub struct GpuContext {
    gl: glow::Context,
    version: String,
}

impl GpuContext {
    /// Wraps the host's GL context and queries `GL_VERSION`.
    #[allow(unsafe_code)]
    pub fn new(gl: glow::Context) -> Self {
        use glow::HasContext;

        // SAFETY: querying a string parameter has no preconditions beyond a
        // current context, which the host guarantees when it hands one over.
        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        log::info!("GL context: {version}");

        Self { gl, version }
    }

    /// The underlying `glow::Context`.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Consumes the wrapper and returns the context.
    pub fn into_gl(self) -> glow::Context {
        self.gl
    }

    /// The `GL_VERSION` string reported by the driver.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether the context is an OpenGL ES or WebGL flavor rather than desktop GL.
    pub fn is_embedded(&self) -> bool {
        is_embedded_version(&self.version)
    }
}

/// ES and WebGL drivers prefix `GL_VERSION` with "OpenGL ES" or "WebGL".
fn is_embedded_version(version: &str) -> bool {
    version.starts_with("OpenGL ES") || version.starts_with("WebGL")
}
