mod bindings;

use bindings::{AlignmentFailed, PyAligner, PyTokenizer};

use pyo3::prelude::*;

/// Twitter and web aware English tokenizer with token alignment.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTokenizer>()?;
    m.add_class::<PyAligner>()?;
    m.add("AlignmentFailed", m.py().get_type_bound::<AlignmentFailed>())?;
    Ok(())
}
