use tracing::warn;

use crate::{error::Error, gl::GraphicsContext};

#[derive(Debug)]
pub(crate) struct ShaderProgram<P> {
    pub(crate) program: P,
}

impl<P: Copy> ShaderProgram<P> {
    pub(crate) fn create<G>(gl: &G, vertex_source: &str, fragment_source: &str) -> Result<Self, Error>
    where
        G: GraphicsContext<Program = P>,
    {
        let program = gl
            .create_program()
            .map_err(|e| Error::shader_program_creation_failed(&e))?;

        // compile shaders
        let shaders = compile_shader(gl, ShaderType::Vertex, vertex_source).and_then(|vs| {
            match compile_shader(gl, ShaderType::Fragment, fragment_source) {
                Ok(fs) => Ok((vs, fs)),
                Err(e) => {
                    gl.delete_shader(vs);
                    Err(e)
                },
            }
        });
        let (vertex_shader, fragment_shader) = match shaders {
            Ok(shaders) => shaders,
            Err(e) => {
                gl.delete_program(program);
                return Err(e);
            },
        };

        // attach shaders and link program
        gl.attach_shader(program, vertex_shader);
        gl.attach_shader(program, fragment_shader);
        gl.link_program(program);

        // delete shaders (no longer needed after linking)
        gl.delete_shader(vertex_shader);
        gl.delete_shader(fragment_shader);

        if let Err(e) = check_link_status(gl, program) {
            gl.delete_program(program);
            return Err(e);
        }

        Ok(ShaderProgram { program })
    }

    /// Use the shader program.
    pub(crate) fn use_program<G: GraphicsContext<Program = P>>(&self, gl: &G) {
        gl.use_program(Some(self.program));
    }

    pub(crate) fn delete<G: GraphicsContext<Program = P>>(self, gl: &G) {
        gl.delete_program(self.program);
    }
}

fn compile_shader<G: GraphicsContext>(
    gl: &G,
    shader_type: ShaderType,
    source: &str,
) -> Result<G::Shader, Error> {
    let shader = gl
        .create_shader(shader_type.into())
        .map_err(|e| Error::shader_creation_failed(&e))?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        let log = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(Error::shader_compile_failed(shader_type.name(), &log));
    }

    Ok(shader)
}

fn check_link_status<G: GraphicsContext>(gl: &G, program: G::Program) -> Result<(), Error> {
    if !gl.program_link_status(program) {
        let log = gl.program_info_log(program);
        return Err(Error::shader_link_failed(&log));
    }

    Ok(())
}

/// Enum representing the type of shader.
#[derive(Clone, Copy)]
enum ShaderType {
    Vertex,
    Fragment,
}

impl ShaderType {
    fn name(self) -> &'static str {
        match self {
            ShaderType::Vertex => "vertex",
            ShaderType::Fragment => "fragment",
        }
    }
}

impl From<ShaderType> for u32 {
    fn from(val: ShaderType) -> Self {
        use ShaderType::*;

        match val {
            Vertex => glow::VERTEX_SHADER,
            Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

/// Swaps between this layer's program and the one the host had bound.
///
/// The host program is captured once, when the context is created; later
/// restores never query ambient GL state. Either side may be absent: the
/// own program when compilation failed, the host program when nothing was
/// bound at startup. Switching to an absent side is a no-op.
#[derive(Debug)]
pub(crate) struct ProgramContext<P> {
    own: Option<ShaderProgram<P>>,
    saved: Option<P>,
    verbose: bool,
}

impl<P: Copy> ProgramContext<P> {
    /// Captures the currently bound host program.
    pub(crate) fn capture<G>(gl: &G, own: Option<ShaderProgram<P>>, verbose: bool) -> Self
    where
        G: GraphicsContext<Program = P>,
    {
        let saved = gl.current_program();
        if saved.is_none() && verbose {
            warn!("no program bound at startup; nothing to restore after drawing");
        }

        Self { own, saved, verbose }
    }

    /// Makes this layer's program current.
    pub(crate) fn bind<G: GraphicsContext<Program = P>>(&self, gl: &G) {
        match &self.own {
            Some(program) => program.use_program(gl),
            None if self.verbose => warn!("could not use post-processing program: none compiled"),
            None => {},
        }
    }

    /// Makes the host program current again.
    pub(crate) fn restore<G: GraphicsContext<Program = P>>(&self, gl: &G) {
        match self.saved {
            Some(program) => gl.use_program(Some(program)),
            None if self.verbose => warn!("could not restore host program: none was saved"),
            None => {},
        }
    }

    pub(crate) fn own(&self) -> Option<&ShaderProgram<P>> {
        self.own.as_ref()
    }

    pub(crate) fn saved(&self) -> Option<P> {
        self.saved
    }

    /// Restores the host program and deletes this layer's program.
    ///
    /// With no host program saved, no program is left current so the
    /// deleted one cannot linger as the bound program.
    pub(crate) fn delete<G: GraphicsContext<Program = P>>(self, gl: &G) {
        gl.use_program(self.saved);
        if let Some(program) = self.own {
            program.delete(gl);
        }
    }
}
