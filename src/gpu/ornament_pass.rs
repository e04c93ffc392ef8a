//! Instanced ornament pass.
//!
//! One base mesh and one instance buffer per population. Instance buffers are
//! rewritten with a single `write_buffer` per population per frame, and only
//! when the population flagged its storage dirty.

use wgpu::util::DeviceExt;

use super::mesh::{Mesh, MeshVertex};
use super::{uniform_entry, DEPTH_FORMAT};
use crate::ornaments::{InstancePopulation, InstanceRaw};
use crate::particle::ParticleClass;
use crate::shader::ORNAMENT_SOURCE;

struct MeshBatch {
    class: ParticleClass,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
}

pub struct OrnamentPass {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    batches: Vec<MeshBatch>,
}

fn mesh_for(class: ParticleClass) -> Mesh {
    match class {
        ParticleClass::Box => Mesh::cube(),
        ParticleClass::Light => Mesh::sphere(8, 6),
        ParticleClass::Ball | ParticleClass::Foliage => Mesh::sphere(24, 16),
    }
}

impl OrnamentPass {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_buffer: &wgpu::Buffer,
        populations: &[InstancePopulation],
    ) -> Self {
        let batches = populations
            .iter()
            .map(|population| {
                let mesh = mesh_for(population.class());
                let name = population.class().name();

                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("Ornament Mesh ({name})")),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("Ornament Indices ({name})")),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("Ornament Instances ({name})")),
                    contents: bytemuck::cast_slice(population.instances()),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                });

                MeshBatch {
                    class: population.class(),
                    vertex_buffer,
                    index_buffer,
                    index_count: mesh.index_count(),
                    instance_buffer,
                    instance_count: population.len() as u32,
                }
            })
            .collect();

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Ornament Bind Group Layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Ornament Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Ornament Shader"),
            source: wgpu::ShaderSource::Wgsl(ORNAMENT_SOURCE.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Ornament Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let mesh_attributes = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        // Four model columns, then color and emissive.
        let instance_attributes = wgpu::vertex_attr_array![
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x3,
            7 => Float32,
        ];

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Ornament Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &mesh_attributes,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &instance_attributes,
                    },
                ],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group,
            batches,
        }
    }

    /// Copy dirty instance storage to the GPU.
    pub fn upload(&self, queue: &wgpu::Queue, populations: &mut [InstancePopulation]) {
        for population in populations.iter_mut() {
            if !population.take_dirty() || population.is_empty() {
                continue;
            }
            if let Some(batch) = self.batches.iter().find(|b| b.class == population.class()) {
                queue.write_buffer(
                    &batch.instance_buffer,
                    0,
                    bytemuck::cast_slice(population.instances()),
                );
            }
        }
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        for batch in self.batches.iter().filter(|b| b.instance_count > 0) {
            pass.set_vertex_buffer(0, batch.vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, batch.instance_buffer.slice(..));
            pass.set_index_buffer(batch.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..batch.index_count, 0, 0..batch.instance_count);
        }
    }
}
