//! Browser bindings.

use js_sys::{Array, Int32Array};
use wasm_bindgen::prelude::*;

use crate::cell::Cell;
use crate::parameters::Parameters;
use crate::solver::HashiSolver;

/// JavaScript handle on a [`HashiSolver`].
///
/// Every accessor returns plain arrays; drawing is left to the page.
#[wasm_bindgen]
pub struct WasmSolver {
    inner: HashiSolver,
    parameters: Parameters,
}

#[wasm_bindgen]
impl WasmSolver {
    /// A solver with default parameters, seeded with `seed`.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WasmSolver {
        let parameters = Parameters::default();
        WasmSolver { inner: HashiSolver::seeded(seed, parameters), parameters }
    }

    /// Load a puzzle given as row-major cell codes, `width` per row.
    pub fn initialize(&mut self, width: usize, codes: Vec<i32>) -> bool {
        let rows = match width {
            0 => Vec::new(),
            _ => codes.chunks(width).map(<[i32]>::to_vec).collect(),
        };
        self.inner.initialize(&rows)
    }

    /// Start the search over on the loaded puzzle.
    pub fn reset(&mut self) -> bool {
        self.inner.reset()
    }

    /// Replace the parameters with a JSON object; missing keys take their defaults.
    pub fn configure(&mut self, json: &str) -> Result<(), JsValue> {
        let parameters: Parameters = serde_json::from_str(json).map_err(|err| JsValue::from_str(&err.to_string()))?;
        parameters.validate().map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.parameters = parameters;
        Ok(())
    }

    /// Run one generation, returning whether to keep going.
    pub fn update(&mut self) -> bool {
        self.inner.update(&self.parameters)
    }

    /// Generations completed since the last reset.
    pub fn generation(&self) -> usize {
        self.inner.generation()
    }

    /// Best fitness so far, as a percentage.
    #[wasm_bindgen(js_name = bestPercentage)]
    pub fn best_percentage(&self) -> f64 {
        self.inner.best_percentage()
    }

    /// Message of the last failure, if any.
    #[wasm_bindgen(js_name = lastError)]
    pub fn last_error(&self) -> Option<String> {
        self.inner.last_error().map(ToString::to_string)
    }

    /// The board with the best layout drawn in, as row-major cell codes.
    pub fn cells(&self) -> Vec<i32> {
        self.inner.view()
            .map(|view| view.cells.iter().map(Cell::code).collect())
            .unwrap_or_default()
    }

    /// One `Int32Array` per island: `[id, x, y, value, complete]`.
    pub fn islands(&self) -> Array {
        let Some(view) = self.inner.view() else {
            return Array::new();
        };

        view.islands.iter()
            .map(|island| {
                let row = [
                    island.id as i32,
                    island.location.0 as i32,
                    island.location.1 as i32,
                    i32::from(island.value),
                    i32::from(island.complete),
                ];
                Int32Array::from(&row[..])
            })
            .collect()
    }

    /// The best chromosome's packed genes, one byte per island.
    pub fn layout(&self) -> Vec<u8> {
        self.inner.best().map(|best| best.chromosome.to_bytes()).unwrap_or_default()
    }
}
