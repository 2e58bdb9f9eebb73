mod properties;
mod renderer;
