//! In-memory [`GraphicsContext`] that records every call, for unit tests.

use std::{
    cell::RefCell,
    collections::{BTreeSet, HashMap},
};

use crate::gl::GraphicsContext;

const MAX_TEXTURE_UNITS: u32 = 8;
const MAX_VERTEX_ATTRIBS: u32 = 16;

/// Attribute and uniform names a successfully linked program exposes.
const ACTIVE_ATTRIBS: &[&str] = &["aVertexPosition"];
const ACTIVE_UNIFORMS: &[&str] = &["viewMatrix", "clipMatrix", "iTime", "iResolution"];

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MockUniform {
    program: u32,
    name: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AttribPointer {
    pub size: i32,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
    pub buffer: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DrawCall {
    pub mode: u32,
    pub count: i32,
    pub element_type: u32,
    pub offset: i32,
    pub program: Option<u32>,
    pub vertex_array: Option<u32>,
    pub index_buffer: Option<u32>,
}

/// State recorded per vertex array object; `None` keys the default one.
#[derive(Debug, Default)]
struct VertexArrayState {
    element_buffer: Option<u32>,
    enabled_attribs: BTreeSet<u32>,
    attrib_pointers: HashMap<u32, AttribPointer>,
}

#[derive(Debug, Default)]
struct ProgramInfo {
    shaders: Vec<u32>,
    linked: bool,
}

#[derive(Debug, Default)]
struct MockState {
    next_id: u32,
    buffers: HashMap<u32, Vec<u8>>,
    bindings: HashMap<u32, u32>,
    sub_data: Vec<(u32, usize, usize)>,
    buffers_until_failure: Option<usize>,
    shaders: HashMap<u32, (u32, String, bool)>,
    failing_stage: Option<u32>,
    fail_link: bool,
    programs: HashMap<u32, ProgramInfo>,
    current_program: Option<u32>,
    use_program_calls: Vec<Option<u32>>,
    uniforms: HashMap<(u32, String), Vec<f32>>,
    vertex_arrays: HashMap<Option<u32>, VertexArrayState>,
    current_vertex_array: Option<u32>,
    draws: Vec<DrawCall>,
    active_texture: u32,
    bound_textures: BTreeSet<u32>,
}

impl MockState {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn bound(&self, target: u32) -> Option<u32> {
        if target == glow::ELEMENT_ARRAY_BUFFER {
            return self
                .vertex_arrays
                .get(&self.current_vertex_array)
                .and_then(|vao| vao.element_buffer);
        }
        self.bindings.get(&target).copied()
    }

    fn vertex_array_mut(&mut self) -> &mut VertexArrayState {
        let current = self.current_vertex_array;
        self.vertex_arrays.entry(current).or_default()
    }

    fn vertex_array(&self, vao: Option<u32>) -> Option<&VertexArrayState> {
        self.vertex_arrays.get(&vao)
    }

    fn linked(&self, program: u32) -> bool {
        self.programs
            .get(&program)
            .is_some_and(|p| p.linked)
    }
}

#[derive(Debug, Default)]
pub(crate) struct MockGl {
    state: RefCell<MockState>,
}

impl MockGl {
    pub(crate) fn new() -> Self {
        let gl = Self::default();
        gl.state.borrow_mut().active_texture = glow::TEXTURE0;
        gl
    }

    /// A context where a host program is already bound, as after a host frame.
    pub(crate) fn with_external_program() -> (Self, u32) {
        let gl = Self::new();
        let program = {
            let mut state = gl.state.borrow_mut();
            let id = state.next_id();
            state
                .programs
                .insert(id, ProgramInfo { shaders: vec![], linked: true });
            state.current_program = Some(id);
            id
        };
        (gl, program)
    }

    pub(crate) fn fail_buffer_creation_after(&self, successes: usize) {
        self.state.borrow_mut().buffers_until_failure = Some(successes);
    }

    pub(crate) fn fail_compile(&self, shader_type: u32) {
        self.state.borrow_mut().failing_stage = Some(shader_type);
    }

    pub(crate) fn fail_link(&self) {
        self.state.borrow_mut().fail_link = true;
    }

    /// Binds a dummy texture on every unit in `units`.
    pub(crate) fn bind_textures_on(&self, units: impl IntoIterator<Item = u32>) {
        self.state.borrow_mut().bound_textures.extend(units);
    }

    pub(crate) fn buffer_store(&self, buffer: u32) -> Vec<u8> {
        self.state.borrow().buffers[&buffer].clone()
    }

    pub(crate) fn buffer_f32(&self, buffer: u32, count: usize) -> Vec<f32> {
        self.buffer_store(buffer)[..count * 4]
            .chunks_exact(4)
            .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
            .collect()
    }

    pub(crate) fn buffer_u16(&self, buffer: u32, count: usize) -> Vec<u16> {
        self.buffer_store(buffer)[..count * 2]
            .chunks_exact(2)
            .map(|b| u16::from_ne_bytes([b[0], b[1]]))
            .collect()
    }

    /// `(offset, len)` in bytes of every sub-data upload to `buffer`.
    pub(crate) fn sub_data_calls(&self, buffer: u32) -> Vec<(usize, usize)> {
        self.state
            .borrow()
            .sub_data
            .iter()
            .filter(|(b, _, _)| *b == buffer)
            .map(|(_, offset, len)| (*offset, *len))
            .collect()
    }

    pub(crate) fn live_buffer_count(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub(crate) fn is_buffer_live(&self, buffer: u32) -> bool {
        self.state.borrow().buffers.contains_key(&buffer)
    }

    pub(crate) fn bound_buffer(&self, target: u32) -> Option<u32> {
        self.state.borrow().bound(target)
    }

    pub(crate) fn current(&self) -> Option<u32> {
        self.state.borrow().current_program
    }

    pub(crate) fn use_program_calls(&self) -> Vec<Option<u32>> {
        self.state.borrow().use_program_calls.clone()
    }

    pub(crate) fn is_program_live(&self, program: u32) -> bool {
        self.state.borrow().programs.contains_key(&program)
    }

    pub(crate) fn live_shader_count(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub(crate) fn uniform(&self, program: u32, name: &str) -> Option<Vec<f32>> {
        self.state
            .borrow()
            .uniforms
            .get(&(program, name.to_string()))
            .cloned()
    }

    /// Attribute pointer `index` of the currently bound vertex array.
    pub(crate) fn attrib_pointer(&self, index: u32) -> Option<AttribPointer> {
        let current = self.state.borrow().current_vertex_array;
        self.attrib_pointer_in(current, index)
    }

    pub(crate) fn attrib_pointer_in(&self, vao: Option<u32>, index: u32) -> Option<AttribPointer> {
        self.state
            .borrow()
            .vertex_array(vao)
            .and_then(|v| v.attrib_pointers.get(&index).copied())
    }

    pub(crate) fn attrib_pointer_count(&self) -> usize {
        let state = self.state.borrow();
        state
            .vertex_array(state.current_vertex_array)
            .map_or(0, |v| v.attrib_pointers.len())
    }

    pub(crate) fn is_attrib_enabled_in(&self, vao: Option<u32>, index: u32) -> bool {
        self.state
            .borrow()
            .vertex_array(vao)
            .is_some_and(|v| v.enabled_attribs.contains(&index))
    }

    pub(crate) fn element_buffer_in(&self, vao: Option<u32>) -> Option<u32> {
        self.state
            .borrow()
            .vertex_array(vao)
            .and_then(|v| v.element_buffer)
    }

    pub(crate) fn live_vertex_array_count(&self) -> usize {
        self.state
            .borrow()
            .vertex_arrays
            .keys()
            .filter(|k| k.is_some())
            .count()
    }

    pub(crate) fn draws(&self) -> Vec<DrawCall> {
        self.state.borrow().draws.clone()
    }

    pub(crate) fn bound_texture_units(&self) -> Vec<u32> {
        self.state
            .borrow()
            .bound_textures
            .iter()
            .copied()
            .collect()
    }

    fn set_uniform(&self, location: &MockUniform, values: &[f32]) {
        let mut state = self.state.borrow_mut();
        assert_eq!(
            state.current_program,
            Some(location.program),
            "uniform {} set while its program is not bound",
            location.name
        );
        state
            .uniforms
            .insert((location.program, location.name.clone()), values.to_vec());
    }
}

impl GraphicsContext for MockGl {
    type Buffer = u32;
    type VertexArray = u32;
    type Shader = u32;
    type Program = u32;
    type UniformLocation = MockUniform;

    fn create_buffer(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        match state.buffers_until_failure {
            Some(0) => return Err("out of memory".to_string()),
            Some(n) => state.buffers_until_failure = Some(n - 1),
            None => {},
        }
        let id = state.next_id();
        state.buffers.insert(id, Vec::new());
        Ok(id)
    }

    fn delete_buffer(&self, buffer: u32) {
        let mut state = self.state.borrow_mut();
        state.buffers.remove(&buffer);
        state.bindings.retain(|_, b| *b != buffer);
        let vao = state.vertex_array_mut();
        if vao.element_buffer == Some(buffer) {
            vao.element_buffer = None;
        }
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        let mut state = self.state.borrow_mut();
        match buffer {
            Some(b) => assert!(state.buffers.contains_key(&b), "binding deleted buffer {b}"),
            None => {},
        }
        if target == glow::ELEMENT_ARRAY_BUFFER {
            state.vertex_array_mut().element_buffer = buffer;
        } else if let Some(b) = buffer {
            state.bindings.insert(target, b);
        } else {
            state.bindings.remove(&target);
        }
    }

    fn current_array_buffer(&self) -> Option<u32> {
        self.state.borrow().bound(glow::ARRAY_BUFFER)
    }

    fn buffer_data_size(&self, target: u32, size_bytes: usize, _usage: u32) {
        let mut state = self.state.borrow_mut();
        let buffer = state.bound(target).expect("no buffer bound");
        state.buffers.insert(buffer, vec![0; size_bytes]);
    }

    fn buffer_sub_data(&self, target: u32, offset_bytes: usize, data: &[u8]) {
        let mut state = self.state.borrow_mut();
        let buffer = state.bound(target).expect("no buffer bound");
        let store = state.buffers.get_mut(&buffer).expect("live buffer");
        assert!(
            offset_bytes + data.len() <= store.len(),
            "sub-data [{offset_bytes}, {}) overflows store of {} bytes",
            offset_bytes + data.len(),
            store.len()
        );
        store[offset_bytes..offset_bytes + data.len()].copy_from_slice(data);
        state.sub_data.push((buffer, offset_bytes, data.len()));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state
            .vertex_arrays
            .insert(Some(id), VertexArrayState::default());
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        let mut state = self.state.borrow_mut();
        if vertex_array.is_some() {
            assert!(
                state.vertex_arrays.contains_key(&vertex_array),
                "binding deleted vertex array {vertex_array:?}"
            );
        }
        state.current_vertex_array = vertex_array;
    }

    fn current_vertex_array(&self) -> Option<u32> {
        self.state.borrow().current_vertex_array
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        let mut state = self.state.borrow_mut();
        state.vertex_arrays.remove(&Some(vertex_array));
        if state.current_vertex_array == Some(vertex_array) {
            state.current_vertex_array = None;
        }
    }

    fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state
            .shaders
            .insert(id, (shader_type, String::new(), false));
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(entry) = self.state.borrow_mut().shaders.get_mut(&shader) {
            entry.1 = source.to_string();
        }
    }

    fn compile_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        let failing = state.failing_stage;
        if let Some(entry) = state.shaders.get_mut(&shader) {
            entry.2 = failing != Some(entry.0);
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .is_some_and(|s| s.2)
    }

    fn shader_info_log(&self, _shader: u32) -> String {
        "ERROR: 0:1: syntax error".to_string()
    }

    fn delete_shader(&self, shader: u32) {
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.programs.insert(id, ProgramInfo::default());
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.shaders.push(shader);
        }
    }

    fn link_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        let compiled = state
            .programs
            .get(&program)
            .map(|p| {
                p.shaders.len() == 2
                    && p.shaders
                        .iter()
                        .all(|s| state.shaders.get(s).is_some_and(|s| s.2))
            })
            .unwrap_or(false);
        let linked = compiled && !state.fail_link;
        if let Some(p) = state.programs.get_mut(&program) {
            p.linked = linked;
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state.borrow().linked(program)
    }

    fn program_info_log(&self, _program: u32) -> String {
        "link error: vertex/fragment interface mismatch".to_string()
    }

    fn delete_program(&self, program: u32) {
        self.state.borrow_mut().programs.remove(&program);
    }

    fn use_program(&self, program: Option<u32>) {
        let mut state = self.state.borrow_mut();
        state.current_program = program;
        state.use_program_calls.push(program);
    }

    fn current_program(&self) -> Option<u32> {
        self.state.borrow().current_program
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        let state = self.state.borrow();
        if !state.linked(program) {
            return None;
        }
        ACTIVE_ATTRIBS
            .iter()
            .position(|a| *a == name)
            .map(|i| i as u32)
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<MockUniform> {
        let state = self.state.borrow();
        (state.linked(program) && ACTIVE_UNIFORMS.contains(&name))
            .then(|| MockUniform { program, name: name.to_string() })
    }

    fn uniform_matrix_3(&self, location: &MockUniform, data: &[f32; 9]) {
        self.set_uniform(location, data);
    }

    fn uniform_1_f32(&self, location: &MockUniform, x: f32) {
        self.set_uniform(location, &[x]);
    }

    fn uniform_2_f32(&self, location: &MockUniform, x: f32, y: f32) {
        self.set_uniform(location, &[x, y]);
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.state
            .borrow_mut()
            .vertex_array_mut()
            .enabled_attribs
            .insert(index);
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        let mut state = self.state.borrow_mut();
        let buffer = state.bound(glow::ARRAY_BUFFER);
        state
            .vertex_array_mut()
            .attrib_pointers
            .insert(index, AttribPointer { size, normalized, stride, offset, buffer });
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        let mut state = self.state.borrow_mut();
        let call = DrawCall {
            mode,
            count,
            element_type,
            offset,
            program: state.current_program,
            vertex_array: state.current_vertex_array,
            index_buffer: state.bound(glow::ELEMENT_ARRAY_BUFFER),
        };
        state.draws.push(call);
    }

    fn active_texture(&self, unit: u32) {
        self.state.borrow_mut().active_texture = unit;
    }

    fn unbind_texture_2d(&self) {
        let mut state = self.state.borrow_mut();
        let unit = state.active_texture - glow::TEXTURE0;
        state.bound_textures.remove(&unit);
    }

    fn max_texture_units(&self) -> u32 {
        MAX_TEXTURE_UNITS
    }

    fn max_vertex_attribs(&self) -> u32 {
        MAX_VERTEX_ATTRIBS
    }
}
