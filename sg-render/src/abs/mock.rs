//! A recording [`ShaderBackend`] with scripted failures, for tests.

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
};

use super::{ShaderBackend, StageKind};

#[derive(Default)]
struct MockState {
    next_id: u32,
    sources: HashMap<u32, String>,
    compiled: HashMap<u32, bool>,
    live_shaders: HashSet<u32>,
    live_programs: HashSet<u32>,
    attached: HashMap<u32, Vec<u32>>,
    compile_failures: Vec<(String, String)>,
    create_failure: Option<String>,
    link_failure: Option<String>,
    compile_calls: usize,
    link_calls: usize,
    detach_calls: usize,
    bound_program: Option<u32>,
    inactive_uniforms: HashSet<String>,
    uniforms: HashMap<(u32, String), Vec<f32>>,
}

impl MockState {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Compiles every source successfully unless it contains a marker registered with
/// [`MockBackend::fail_compile`], and links every program unless [`MockBackend::fail_link`] was
/// called.
#[derive(Default)]
pub struct MockBackend {
    state: RefCell<MockState>,
}

impl MockBackend {
    /// Makes sources containing `marker` fail to compile with `log`.
    pub fn fail_compile(&self, marker: &str, log: &str) {
        self.state
            .borrow_mut()
            .compile_failures
            .push((marker.to_string(), log.to_string()));
    }

    /// Makes shader object creation fail with `message`.
    pub fn fail_create(&self, message: &str) {
        self.state.borrow_mut().create_failure = Some(message.to_string());
    }

    /// Makes every link fail with `log`.
    pub fn fail_link(&self, log: &str) {
        self.state.borrow_mut().link_failure = Some(log.to_string());
    }

    /// Makes the uniform `name` report no location, as if the linker removed it.
    pub fn deactivate_uniform(&self, name: &str) {
        self.state
            .borrow_mut()
            .inactive_uniforms
            .insert(name.to_string());
    }

    pub fn source_of(&self, shader: u32) -> Option<String> {
        self.state.borrow().sources.get(&shader).cloned()
    }

    pub fn attached_to(&self, program: u32) -> Vec<u32> {
        self.state
            .borrow()
            .attached
            .get(&program)
            .cloned()
            .unwrap_or_default()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().live_shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().live_programs.len()
    }

    pub fn compile_calls(&self) -> usize {
        self.state.borrow().compile_calls
    }

    pub fn link_calls(&self) -> usize {
        self.state.borrow().link_calls
    }

    pub fn detach_calls(&self) -> usize {
        self.state.borrow().detach_calls
    }

    pub fn bound_program(&self) -> Option<u32> {
        self.state.borrow().bound_program
    }

    /// Returns the last value uploaded to uniform `name` of `program`.
    pub fn uniform(&self, program: u32, name: &str) -> Option<Vec<f32>> {
        self.state
            .borrow()
            .uniforms
            .get(&(program, name.to_string()))
            .cloned()
    }

    fn store_uniform(&self, location: &(u32, String), value: &[f32]) {
        self.state
            .borrow_mut()
            .uniforms
            .insert(location.clone(), value.to_vec());
    }

    fn failure_for(&self, shader: u32) -> Option<String> {
        let state = self.state.borrow();
        let source = state.sources.get(&shader)?;
        state
            .compile_failures
            .iter()
            .find(|(marker, _)| source.contains(marker.as_str()))
            .map(|(_, log)| log.clone())
    }
}

impl ShaderBackend for MockBackend {
    type Shader = u32;
    type Program = u32;
    type UniformLocation = (u32, String);

    fn create_shader(&self, _kind: StageKind) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        if let Some(message) = &state.create_failure {
            return Err(message.clone());
        }
        let id = state.next_id();
        state.live_shaders.insert(id);
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.state
            .borrow_mut()
            .sources
            .insert(shader, source.to_string());
    }

    fn compile_shader(&self, shader: u32) {
        let ok = self.failure_for(shader).is_none();
        let mut state = self.state.borrow_mut();
        state.compile_calls += 1;
        state.compiled.insert(shader, ok);
    }

    fn compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .compiled
            .get(&shader)
            .copied()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.failure_for(shader).unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.state.borrow_mut().live_shaders.remove(&shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.live_programs.insert(id);
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.state
            .borrow_mut()
            .attached
            .entry(program)
            .or_default()
            .push(shader);
    }

    fn detach_shader(&self, _program: u32, _shader: u32) {
        self.state.borrow_mut().detach_calls += 1;
    }

    fn link_program(&self, _program: u32) {
        self.state.borrow_mut().link_calls += 1;
    }

    fn link_status(&self, _program: u32) -> bool {
        self.state.borrow().link_failure.is_none()
    }

    fn program_info_log(&self, _program: u32) -> String {
        self.state.borrow().link_failure.clone().unwrap_or_default()
    }

    fn delete_program(&self, program: u32) {
        self.state.borrow_mut().live_programs.remove(&program);
    }

    fn bind_program(&self, program: u32) {
        self.state.borrow_mut().bound_program = Some(program);
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<(u32, String)> {
        let state = self.state.borrow();
        (state.live_programs.contains(&program) && !state.inactive_uniforms.contains(name))
            .then(|| (program, name.to_string()))
    }

    fn uniform_vec4(&self, location: &(u32, String), value: [f32; 4]) {
        self.store_uniform(location, &value);
    }

    fn uniform_mat4(&self, location: &(u32, String), value: &[f32; 16]) {
        self.store_uniform(location, value);
    }
}
