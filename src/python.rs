//! Python bindings for the wish simulator using PyO3

use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::simulation::{limited_counts as run_limited_counts, run_and_aggregate, worker_threads};
use numpy::{IntoPyArray, PyArray1};
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(err: SimError) -> PyErr {
    match err {
        SimError::InvalidConfiguration(_) | SimError::Parse(_) => {
            PyValueError::new_err(err.to_string())
        }
        SimError::Io(_) => PyIOError::new_err(err.to_string()),
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_config(
    wish_count: u32,
    target_count: u32,
    current_pity: u32,
    banner_pity: u32,
    guaranteed: bool,
    simulation_count: u32,
    capturing_radiance: u32,
    seed: Option<u64>,
    parallel: bool,
) -> SimulationConfig {
    let mut config = SimulationConfig::new(wish_count, target_count, banner_pity)
        .with_pity(current_pity, guaranteed)
        .with_cr_score(capturing_radiance)
        .with_simulation_count(simulation_count)
        .with_parallel(parallel, None);
    config.seed = seed;
    config
}

/// Probability of at least `target_count` limited 5-stars in `wish_count` wishes
#[pyfunction]
#[pyo3(signature = (
    wish_count,
    target_count,
    current_pity,
    banner_pity,
    guaranteed=false,
    simulation_count=10000,
    capturing_radiance=1,
    seed=None,
    parallel=true
))]
#[allow(clippy::too_many_arguments)]
fn estimate_probability(
    py: Python<'_>,
    wish_count: u32,
    target_count: u32,
    current_pity: u32,
    banner_pity: u32,
    guaranteed: bool,
    simulation_count: u32,
    capturing_radiance: u32,
    seed: Option<u64>,
    parallel: bool,
) -> PyResult<f64> {
    let config = build_config(
        wish_count,
        target_count,
        current_pity,
        banner_pity,
        guaranteed,
        simulation_count,
        capturing_radiance,
        seed,
        parallel,
    );

    // Release GIL during computation
    let estimate = py.allow_threads(|| run_and_aggregate(&config)).map_err(to_py_err)?;
    Ok(estimate.probability)
}

/// Run from a JSON config, returning the full statistics as JSON
#[pyfunction]
fn simulate_json(py: Python<'_>, config_json: &str) -> PyResult<String> {
    let config = SimulationConfig::from_json(config_json).map_err(to_py_err)?;

    let estimate = py.allow_threads(|| run_and_aggregate(&config)).map_err(to_py_err)?;

    serde_json::to_string(&estimate)
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to serialize results: {}", e)))
}

/// Per-trial limited counts as a numpy array
#[pyfunction]
#[pyo3(signature = (
    wish_count,
    target_count,
    current_pity,
    banner_pity,
    guaranteed=false,
    simulation_count=10000,
    capturing_radiance=1,
    seed=None
))]
#[allow(clippy::too_many_arguments)]
fn limited_counts<'py>(
    py: Python<'py>,
    wish_count: u32,
    target_count: u32,
    current_pity: u32,
    banner_pity: u32,
    guaranteed: bool,
    simulation_count: u32,
    capturing_radiance: u32,
    seed: Option<u64>,
) -> PyResult<Bound<'py, PyArray1<u32>>> {
    let config = build_config(
        wish_count,
        target_count,
        current_pity,
        banner_pity,
        guaranteed,
        simulation_count,
        capturing_radiance,
        seed,
        false,
    );

    let counts = py.allow_threads(|| run_limited_counts(&config)).map_err(to_py_err)?;
    Ok(counts.into_pyarray(py))
}

/// Number of worker threads a parallel run would use for the given `threads` setting
#[pyfunction]
#[pyo3(signature = (threads=None))]
fn get_thread_count(threads: Option<usize>) -> PyResult<usize> {
    Ok(worker_threads(threads))
}

/// Get number of available CPU cores
#[pyfunction]
fn get_available_cores() -> PyResult<usize> {
    Ok(num_cpus::get())
}

/// Python module definition
#[pymodule]
fn wish_sim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(estimate_probability, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_json, m)?)?;
    m.add_function(wrap_pyfunction!(limited_counts, m)?)?;
    m.add_function(wrap_pyfunction!(get_thread_count, m)?)?;
    m.add_function(wrap_pyfunction!(get_available_cores, m)?)?;
    Ok(())
}
