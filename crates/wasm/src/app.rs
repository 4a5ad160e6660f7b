use crate::clock::elapsed_from_ms;
use gl_lessons::LessonKind;
use gl_lessons_core::render::{GpuContext, Renderer};
use gl_lessons_core::Lesson;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// One lesson running on one WebGL2 canvas.
#[wasm_bindgen]
pub struct LessonApp {
    gpu: GpuContext,
    renderer: Option<Renderer>,
}

#[wasm_bindgen]
impl LessonApp {
    /// Starts `lesson` (name or number) with default parameters.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, lesson: &str) -> Result<LessonApp, JsValue> {
        Self::with_params(canvas, lesson, "{}")
    }

    /// Starts `lesson` with parameters given as a JSON object string.
    #[wasm_bindgen(js_name = withParams)]
    pub fn with_params(
        canvas: HtmlCanvasElement,
        lesson: &str,
        params: &str,
    ) -> Result<LessonApp, JsValue> {
        let params: serde_json::Value = serde_json::from_str(params).map_err(js_err)?;
        let lesson = LessonKind::from_name(lesson, &params).map_err(js_err)?;

        let context = canvas
            .get_context("webgl2")?
            .ok_or_else(|| JsValue::from_str("WebGL2 is not available"))?
            .dyn_into::<WebGl2RenderingContext>()?;
        let gpu = GpuContext::new(glow::Context::from_webgl2_context(context));
        if !gpu.is_embedded() {
            log::warn!("unexpected GL_VERSION for a WebGL2 context: {}", gpu.version());
        }

        let mut renderer = Renderer::surface_created(gpu.gl(), Box::new(lesson)).map_err(js_err)?;
        renderer
            .surface_changed(gpu.gl(), canvas.width(), canvas.height())
            .map_err(js_err)?;

        Ok(Self {
            gpu,
            renderer: Some(renderer),
        })
    }

    /// Updates the viewport and projection for a new canvas size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        log::info!("canvas resized to {width}x{height}");
        match self.renderer.as_mut() {
            Some(r) => r.surface_changed(self.gpu.gl(), width, height).map_err(js_err),
            None => Ok(()),
        }
    }

    /// Draws the frame for `time_ms` milliseconds since the app started.
    pub fn frame(&self, time_ms: f64) -> Result<(), JsValue> {
        match self.renderer.as_ref() {
            Some(r) => r
                .draw_frame(self.gpu.gl(), elapsed_from_ms(time_ms))
                .map_err(js_err),
            None => Ok(()),
        }
    }

    /// Canonical name of the running lesson.
    #[wasm_bindgen(getter)]
    pub fn lesson(&self) -> String {
        self.renderer
            .as_ref()
            .map(|r| r.lesson().name().to_string())
            .unwrap_or_default()
    }

    /// GL version string reported by the browser.
    #[wasm_bindgen(getter, js_name = glVersion)]
    pub fn gl_version(&self) -> String {
        self.gpu.version().to_string()
    }
}

impl Drop for LessonApp {
    fn drop(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            log::debug!("releasing GL objects for {}", renderer.lesson().name());
            renderer.destroy(self.gpu.gl());
        }
    }
}
