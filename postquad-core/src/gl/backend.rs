use std::fmt::Debug;

use glow::HasContext;

/// The subset of a GL context the post-processing pass needs.
///
/// The host owns the context; this layer only borrows it for the duration
/// of a call. Enum arguments are raw GL constants (`glow::ARRAY_BUFFER`,
/// `glow::TRIANGLES`, ...), as with glow's own `HasContext`.
///
/// Implemented for [`glow::Context`], which covers both native OpenGL and
/// WebGL2 hosts.
pub trait GraphicsContext {
    /// Buffer object handle.
    type Buffer: Copy + Debug + PartialEq;
    /// Vertex array object handle.
    type VertexArray: Copy + Debug + PartialEq;
    /// Shader object handle.
    type Shader: Copy + Debug;
    /// Program object handle.
    type Program: Copy + Debug + PartialEq;
    /// Resolved uniform location.
    type UniformLocation: Clone + Debug;

    /// Creates a buffer object.
    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    /// Deletes a buffer object; bindings to it revert to none.
    fn delete_buffer(&self, buffer: Self::Buffer);
    /// Binds `buffer` to `target`, or clears the binding.
    fn bind_buffer(&self, target: u32, buffer: Option<Self::Buffer>);
    /// The buffer bound to `ARRAY_BUFFER`.
    fn current_array_buffer(&self) -> Option<Self::Buffer>;
    /// (Re)allocates the store of the buffer bound to `target`; contents are undefined.
    fn buffer_data_size(&self, target: u32, size_bytes: usize, usage: u32);
    /// Writes `data` into the buffer bound to `target` at a byte offset.
    fn buffer_sub_data(&self, target: u32, offset_bytes: usize, data: &[u8]);

    /// Creates a vertex array object.
    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    /// Binds a vertex array object; `None` selects the default one.
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    /// The vertex array object currently bound.
    fn current_vertex_array(&self) -> Option<Self::VertexArray>;
    /// Deletes a vertex array object.
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);

    /// Creates a shader of the given stage (`VERTEX_SHADER`, `FRAGMENT_SHADER`).
    fn create_shader(&self, shader_type: u32) -> Result<Self::Shader, String>;
    /// Replaces the shader's source.
    fn shader_source(&self, shader: Self::Shader, source: &str);
    /// Compiles the shader; check the result with `shader_compile_status`.
    fn compile_shader(&self, shader: Self::Shader);
    /// Returns true if the last compile succeeded.
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    /// Compiler output for the shader.
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    /// Deletes a shader object.
    fn delete_shader(&self, shader: Self::Shader);

    /// Creates a program object.
    fn create_program(&self) -> Result<Self::Program, String>;
    /// Attaches a compiled shader to a program.
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Links the program; check the result with `program_link_status`.
    fn link_program(&self, program: Self::Program);
    /// Returns true if the last link succeeded.
    fn program_link_status(&self, program: Self::Program) -> bool;
    /// Linker output for the program.
    fn program_info_log(&self, program: Self::Program) -> String;
    /// Deletes a program object.
    fn delete_program(&self, program: Self::Program);
    /// Makes `program` current, or unbinds any program.
    fn use_program(&self, program: Option<Self::Program>);
    /// The program currently bound by whoever last called `use_program`.
    fn current_program(&self) -> Option<Self::Program>;

    /// Location of an active vertex attribute.
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    /// Location of an active uniform.
    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;
    /// Sets a `mat3` uniform of the current program from column-major data.
    fn uniform_matrix_3(&self, location: &Self::UniformLocation, data: &[f32; 9]);
    /// Sets a `float` uniform of the current program.
    fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32);
    /// Sets a `vec2` uniform of the current program.
    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32);

    /// Enables a vertex attribute on the bound vertex array object.
    fn enable_vertex_attrib_array(&self, index: u32);
    /// Points a float attribute of the bound vertex array object at the
    /// buffer bound to `ARRAY_BUFFER`.
    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );
    /// Draws indexed primitives from the bound element buffer.
    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32);

    /// Selects the active texture unit (`TEXTURE0 + n`).
    fn active_texture(&self, unit: u32);
    /// Clears the 2D texture binding of the active unit.
    fn unbind_texture_2d(&self);

    /// Value of `MAX_TEXTURE_IMAGE_UNITS`.
    fn max_texture_units(&self) -> u32;
    /// Value of `MAX_VERTEX_ATTRIBS`.
    fn max_vertex_attribs(&self) -> u32;
}

impl GraphicsContext for glow::Context {
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;
    type Shader = glow::Shader;
    type Program = glow::Program;
    type UniformLocation = glow::UniformLocation;

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) };
    }

    fn bind_buffer(&self, target: u32, buffer: Option<Self::Buffer>) {
        unsafe { HasContext::bind_buffer(self, target, buffer) };
    }

    fn current_array_buffer(&self) -> Option<Self::Buffer> {
        unsafe { self.get_parameter_buffer(glow::ARRAY_BUFFER_BINDING) }
    }

    fn buffer_data_size(&self, target: u32, size_bytes: usize, usage: u32) {
        unsafe { HasContext::buffer_data_size(self, target, size_bytes as i32, usage) };
    }

    fn buffer_sub_data(&self, target: u32, offset_bytes: usize, data: &[u8]) {
        unsafe { self.buffer_sub_data_u8_slice(target, offset_bytes as i32, data) };
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array) };
    }

    fn current_vertex_array(&self) -> Option<Self::VertexArray> {
        unsafe { self.get_parameter_vertex_array(glow::VERTEX_ARRAY_BINDING) }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, vertex_array) };
    }

    fn create_shader(&self, shader_type: u32) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, shader_type) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) };
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::compile_shader(self, shader) };
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) };
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) };
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) };
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) };
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) };
    }

    fn current_program(&self) -> Option<Self::Program> {
        unsafe { self.get_parameter_program(glow::CURRENT_PROGRAM) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.get_attrib_location(program, name) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn uniform_matrix_3(&self, location: &Self::UniformLocation, data: &[f32; 9]) {
        unsafe { self.uniform_matrix_3_f32_slice(Some(location), false, data) };
    }

    fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32) {
        unsafe { HasContext::uniform_1_f32(self, Some(location), x) };
    }

    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32) {
        unsafe { HasContext::uniform_2_f32(self, Some(location), x, y) };
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { HasContext::enable_vertex_attrib_array(self, index) };
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            HasContext::vertex_attrib_pointer_f32(
                self,
                index,
                size,
                glow::FLOAT,
                normalized,
                stride,
                offset,
            );
        }
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        unsafe { HasContext::draw_elements(self, mode, count, element_type, offset) };
    }

    fn active_texture(&self, unit: u32) {
        unsafe { HasContext::active_texture(self, unit) };
    }

    fn unbind_texture_2d(&self) {
        unsafe { self.bind_texture(glow::TEXTURE_2D, None) };
    }

    fn max_texture_units(&self) -> u32 {
        let units = unsafe { self.get_parameter_i32(glow::MAX_TEXTURE_IMAGE_UNITS) };
        units.max(0) as u32
    }

    fn max_vertex_attribs(&self) -> u32 {
        let attribs = unsafe { self.get_parameter_i32(glow::MAX_VERTEX_ATTRIBS) };
        attribs.max(0) as u32
    }
}
